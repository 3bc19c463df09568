//! Pregnancy due date by Naegele's rule.
//!
//! Pure date arithmetic over calendar dates, so no timezone can shift the
//! answer. `today` is a parameter to keep results reproducible.

use serde::{Serialize, Serializer};
use time::macros::format_description;
use time::{Date, Duration};

use super::CalcError;

pub const GESTATION_DAYS: i64 = 280;
pub const MAX_DISPLAY_WEEKS: u32 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trimester {
    #[serde(rename = "First Trimester")]
    First,
    #[serde(rename = "Second Trimester")]
    Second,
    #[serde(rename = "Third Trimester")]
    Third,
}

impl Trimester {
    /// Week 13 starts the second trimester, week 27 the third.
    #[must_use]
    pub fn for_week(weeks: u32) -> Self {
        match weeks {
            0..=12 => Self::First,
            13..=26 => Self::Second,
            _ => Self::Third,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "First Trimester",
            Self::Second => "Second Trimester",
            Self::Third => "Third Trimester",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateResult {
    #[serde(serialize_with = "iso_date")]
    pub due_date: Date,
    /// Whole weeks since the LMP, capped at 42.
    pub weeks_pregnant: u32,
    pub trimester: Trimester,
    /// Days until the due date; zero once it has passed.
    pub days_left: u32,
}

/// Compute the due date and progress for a last-menstrual-period date.
///
/// # Errors
///
/// Returns [`CalcError::InvalidDate`] if the due date falls outside the
/// supported calendar range.
pub fn calculate(lmp: Date, today: Date) -> Result<DueDateResult, CalcError> {
    let due_date = lmp
        .checked_add(Duration::days(GESTATION_DAYS))
        .ok_or_else(|| CalcError::InvalidDate(format!("{lmp} + {GESTATION_DAYS} days is out of range")))?;

    let elapsed_weeks = (today - lmp).whole_days().unsigned_abs() / 7;
    let weeks = u32::try_from(elapsed_weeks).unwrap_or(u32::MAX);
    let days_left = u32::try_from((due_date - today).whole_days().max(0)).unwrap_or(u32::MAX);

    Ok(DueDateResult {
        due_date,
        weeks_pregnant: weeks.min(MAX_DISPLAY_WEEKS),
        trimester: Trimester::for_week(weeks),
        days_left,
    })
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`CalcError::InvalidDate`] on malformed input.
pub fn parse_date(raw: &str) -> Result<Date, CalcError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| CalcError::InvalidDate(format!("{raw}: {e}")))
}

/// Human form, e.g. `Mon Oct 07 2024`.
#[must_use]
pub fn display_date(date: Date) -> String {
    date.format(format_description!("[weekday repr:short] [month repr:short] [day] [year]"))
        .unwrap_or_else(|_| date.to_string())
}

fn iso_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let text = date
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

#[cfg(test)]
#[path = "due_date_test.rs"]
mod tests;
