//! Plain-text cards for the terminal front-end.
//!
//! Every function returns a `String` without a trailing newline. Cards that
//! show medical content are passed through [`with_disclaimer`] by the caller.

use std::fmt::Write as _;

use crate::analysis::{BloodResult, HcgReading, SkinResult, UrineFinding, UrineMode, UrineSeverity, XrayResult};
use crate::calc::compatibility::{self, BloodType};
use crate::calc::dose::{self, Concentration, DoseResult};
use crate::calc::due_date::{self, DueDateResult};
use crate::reference::{self, ContactKind, Medicine};
use crate::state::{PanelStatus, View};

const RULE: &str = "----------------------------------------";

fn heading(title: &str) -> String {
    format!("{title}\n{RULE}")
}

#[must_use]
pub fn with_disclaimer(card: &str) -> String {
    format!("{card}\n\n{}", reference::DISCLAIMER_TEXT)
}

// =============================================================================
// CALCULATORS
// =============================================================================

#[must_use]
pub fn dose_card(medicine: &Medicine, weight_kg: f64, concentration: Concentration, result: &DoseResult) -> String {
    let mut out = heading(&format!("{} for {weight_kg} kg", medicine.name));
    let _ = write!(
        out,
        "\nGive:        {} - {} ml\nSingle dose: {} - {} mg\nFrequency:   every {} hours\nMax daily:   {} mg/day",
        result.volume_ml_min,
        result.volume_ml_max,
        result.single_dose_mg_min,
        result.single_dose_mg_max,
        medicine.frequency_hours,
        result.max_daily_dose,
    );
    if let Some(warning) = &result.warning {
        let _ = write!(out, "\n\n!! {warning}");
    }
    let _ = write!(out, "\n\nSource: {} ({})", medicine.citation, medicine.link);
    let _ = write!(out, "\n\n{}", dose::report(medicine, weight_kg, concentration, result));
    out
}

#[must_use]
pub fn due_date_card(result: &DueDateResult) -> String {
    let mut out = heading(View::DueDate.title());
    let _ = write!(
        out,
        "\nEstimated due date: {}\nWeeks pregnant:     {}\nTrimester:          {}\nDays left:          {}",
        due_date::display_date(result.due_date),
        result.weeks_pregnant,
        result.trimester.label(),
        result.days_left,
    );
    out
}

/// The full chart: one row per recipient, one column per donor.
#[must_use]
pub fn compatibility_chart() -> String {
    let matrix = compatibility::matrix();
    let mut out = heading(&format!("{} (rows: recipient, columns: donor)", View::Compatibility.title()));
    out.push_str("\n     ");
    for donor in BloodType::ALL {
        let _ = write!(out, "{:>4}", donor.as_str());
    }
    for (recipient, row) in BloodType::ALL.iter().zip(matrix.iter()) {
        let _ = write!(out, "\n{:<5}", recipient.as_str());
        for &ok in row {
            out.push_str(if ok { "   Y" } else { "   ." });
        }
    }
    out
}

#[must_use]
pub fn compatibility_pair(donor: BloodType, recipient: BloodType) -> String {
    let verdict = if compatibility::is_compatible(donor, recipient) { "COMPATIBLE" } else { "NOT compatible" };
    let mut out = heading(&format!("{donor} -> {recipient}: {verdict}"));
    let _ = write!(out, "\n{recipient} can receive from: {}", join(recipient.receive_from()));
    let _ = write!(out, "\n{donor} can donate to:     {}", join(donor.donate_to()));
    out
}

fn join(types: &[BloodType]) -> String {
    types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
}

// =============================================================================
// ANALYSIS CARDS
// =============================================================================

#[must_use]
pub fn blood_card(result: &BloodResult) -> String {
    let mut out = heading(&format!("Blood Group: {}", result.blood_group));
    let _ = write!(
        out,
        "\nConfidence:     {:.0}%\nAntigens:       {}\nAntibodies:     {}\nAgglutination:  {}\nRecommendation: {}",
        result.confidence, result.antigens(), result.antibodies, result.agglutination_details, result.recommendation,
    );
    out
}

#[must_use]
pub fn urine_card(findings: &[UrineFinding], mode: UrineMode) -> String {
    match (mode, findings) {
        (UrineMode::Pregnancy, [only]) => {
            let mut out = heading(&format!("HCG Strip: {}", HcgReading::from_finding(only).label()));
            let _ = write!(out, "\n{}\nAdvice: {}", only.interpretation, only.advice);
            out
        }
        _ => {
            let mut out = heading("Urine Dipstick");
            for item in findings {
                let _ = write!(
                    out,
                    "\n[{}] {}: {}\n    {}\n    Advice: {}",
                    severity_tag(item.severity),
                    item.parameter,
                    item.finding,
                    item.interpretation,
                    item.advice,
                );
            }
            out
        }
    }
}

fn severity_tag(severity: UrineSeverity) -> &'static str {
    match severity {
        UrineSeverity::Normal | UrineSeverity::Negative => "ok",
        UrineSeverity::Trace => "trace",
        UrineSeverity::Moderate => "moderate",
        UrineSeverity::High | UrineSeverity::Positive => "HIGH",
        UrineSeverity::Invalid => "invalid",
    }
}

#[must_use]
pub fn skin_card(result: &SkinResult) -> String {
    let mut out = heading(&format!("Skin: {} ({:.0}%)", result.condition, result.probability));
    let _ = write!(
        out,
        "\nSeverity:       {:?}\n{}\nRecommendation: {}",
        result.severity, result.description, result.recommendation,
    );
    out
}

#[must_use]
pub fn xray_card(result: &XrayResult) -> String {
    let flag = if result.abnormality_detected { "ABNORMALITY DETECTED" } else { "no abnormality detected" };
    let mut out = heading(&format!("X-Ray: {} ({flag})", result.body_part));
    let _ = write!(
        out,
        "\nFindings:   {}\nImpression: {}\nAdvice:     {}",
        result.findings, result.impression, result.advice,
    );
    out
}

/// Render a panel after submission. A failed panel shows the error card and
/// the message; an idle one shows nothing.
#[must_use]
pub fn skin_panel(status: &PanelStatus<SkinResult>) -> String {
    match status {
        PanelStatus::Done(result) => skin_card(result),
        PanelStatus::Failed(message) => failure(&skin_card(&SkinResult::error_card()), message),
        PanelStatus::Loading => "Analyzing...".into(),
        PanelStatus::Idle => String::new(),
    }
}

#[must_use]
pub fn xray_panel(status: &PanelStatus<XrayResult>) -> String {
    match status {
        PanelStatus::Done(result) => xray_card(result),
        PanelStatus::Failed(message) => failure(&xray_card(&XrayResult::error_card()), message),
        PanelStatus::Loading => "Analyzing...".into(),
        PanelStatus::Idle => String::new(),
    }
}

fn failure(card: &str, message: &str) -> String {
    format!("{card}\n\nError: {message}")
}

// =============================================================================
// REFERENCE
// =============================================================================

#[must_use]
pub fn emergency_card() -> String {
    let mut out = heading(View::Emergency.title());
    for contact in &reference::EMERGENCY_CONTACTS {
        let kind = match contact.kind {
            ContactKind::Emergency => "emergency",
            ContactKind::PoisonControl => "poison control",
        };
        let _ = write!(out, "\n{:<26} {:<12} {kind}", contact.name, contact.number);
    }
    out
}

#[must_use]
pub fn transport_card() -> String {
    let mut out = heading(View::Transport.title());
    for option in &reference::TRANSPORT_OPTIONS {
        let _ = write!(out, "\n{:<18} {:<11} ETA {:<10} {}", option.name, option.price, option.eta, option.features);
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
