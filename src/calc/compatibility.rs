//! ABO/Rh red-cell compatibility matrix.
//!
//! The table is keyed by recipient: each type lists the donors it can
//! receive from. `donate_to` is the same table read the other way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "O-")]
    ONeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "AB+")]
    AbPos,
}

use BloodType::{AbNeg, AbPos, ANeg, APos, BNeg, BPos, ONeg, OPos};

impl BloodType {
    /// Display order for the matrix rows and columns.
    pub const ALL: [BloodType; 8] = [ONeg, OPos, ANeg, APos, BNeg, BPos, AbNeg, AbPos];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ONeg => "O-",
            OPos => "O+",
            ANeg => "A-",
            APos => "A+",
            BNeg => "B-",
            BPos => "B+",
            AbNeg => "AB-",
            AbPos => "AB+",
        }
    }

    /// Donors this type can safely receive red cells from.
    #[must_use]
    pub fn receive_from(self) -> &'static [BloodType] {
        match self {
            ONeg => &[ONeg],
            OPos => &[OPos, ONeg],
            ANeg => &[ANeg, ONeg],
            APos => &[APos, ANeg, OPos, ONeg],
            BNeg => &[BNeg, ONeg],
            BPos => &[BPos, BNeg, OPos, ONeg],
            AbNeg => &[AbNeg, ANeg, BNeg, ONeg],
            AbPos => &[ONeg, OPos, ANeg, APos, BNeg, BPos, AbNeg, AbPos],
        }
    }

    /// Recipients this type can donate to.
    #[must_use]
    pub fn donate_to(self) -> &'static [BloodType] {
        match self {
            ONeg => &[ONeg, OPos, ANeg, APos, BNeg, BPos, AbNeg, AbPos],
            OPos => &[OPos, APos, BPos, AbPos],
            ANeg => &[ANeg, APos, AbNeg, AbPos],
            APos => &[APos, AbPos],
            BNeg => &[BNeg, BPos, AbNeg, AbPos],
            BPos => &[BPos, AbPos],
            AbNeg => &[AbNeg, AbPos],
            AbPos => &[AbPos],
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = CalcError;

    /// Case-insensitive; inner whitespace is ignored (`"ab +"` parses as AB+).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        BloodType::ALL
            .into_iter()
            .find(|t| t.as_str() == norm)
            .ok_or_else(|| CalcError::UnknownBloodType(s.to_string()))
    }
}

/// Whether `donor` red cells can be given to `recipient`.
#[must_use]
pub fn is_compatible(donor: BloodType, recipient: BloodType) -> bool {
    recipient.receive_from().contains(&donor)
}

/// Full matrix, `rows[recipient][donor]`, in [`BloodType::ALL`] order.
#[must_use]
pub fn matrix() -> [[bool; 8]; 8] {
    let mut rows = [[false; 8]; 8];
    for (r, recipient) in BloodType::ALL.into_iter().enumerate() {
        for (d, donor) in BloodType::ALL.into_iter().enumerate() {
            rows[r][d] = is_compatible(donor, recipient);
        }
    }
    rows
}

#[cfg(test)]
#[path = "compatibility_test.rs"]
mod tests;
