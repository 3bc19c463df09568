//! Urine dipstick and HCG pregnancy strip analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema;
use super::{AnalysisKind, KindSpec};

const STANDARD_INSTRUCTION: &str = "Analyze this urine dipstick or lab report. Identify parameters like Glucose, \
Protein, pH, Leukocytes. Compare colors. Return list of findings. Educational only.";

const PREGNANCY_INSTRUCTION: &str = "Analyze this image of a pregnancy test strip (HCG urine test).
Look for the Control Line (C) and Test Line (T).
If 2 lines are visible => Positive.
If 1 line (C only) => Negative.
If no lines or T only => Invalid.
Return a single result item with parameter=\"HCG Pregnancy Test\", finding=\"Positive/Negative\", \
interpretation=\"Pregnant/Not Pregnant\", severity=\"Positive/Negative/Invalid\".";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrineMode {
    #[default]
    Standard,
    Pregnancy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrineSeverity {
    Normal,
    Trace,
    Moderate,
    High,
    Positive,
    Negative,
    Invalid,
}

impl UrineSeverity {
    pub const ALL: [&'static str; 7] = ["Normal", "Trace", "Moderate", "High", "Positive", "Negative", "Invalid"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrineFinding {
    pub parameter: String,
    pub finding: String,
    pub interpretation: String,
    pub severity: UrineSeverity,
    pub advice: String,
}

impl UrineFinding {
    /// Returned without calling the provider when no credential is configured.
    #[must_use]
    pub fn fallback() -> Vec<Self> {
        vec![Self {
            parameter: "General".into(),
            finding: "Unavailable".into(),
            interpretation: "API Key missing".into(),
            severity: UrineSeverity::Normal,
            advice: "Check API configuration.".into(),
        }]
    }

    /// Returned when the provider call or its parse fails.
    #[must_use]
    pub fn failed() -> Vec<Self> {
        vec![Self {
            parameter: "Error".into(),
            finding: "Failed".into(),
            interpretation: "Could not process image.".into(),
            severity: UrineSeverity::Normal,
            advice: "Try again.".into(),
        }]
    }
}

// =============================================================================
// HCG READING
// =============================================================================

/// Outcome of a pregnancy strip, derived from the single result item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HcgReading {
    Positive,
    Negative,
    Invalid,
}

impl HcgReading {
    /// Severity wins when it carries the answer; otherwise the finding text
    /// is searched. `"Not Pregnant"`-style text never reads as positive.
    #[must_use]
    pub fn from_finding(item: &UrineFinding) -> Self {
        match item.severity {
            UrineSeverity::Positive => return Self::Positive,
            UrineSeverity::Negative => return Self::Negative,
            UrineSeverity::Invalid => return Self::Invalid,
            _ => {}
        }
        let finding = item.finding.to_ascii_lowercase();
        if finding.contains("invalid") {
            Self::Invalid
        } else if finding.contains("negative") {
            Self::Negative
        } else if finding.contains("positive") {
            Self::Positive
        } else {
            Self::Invalid
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive (Pregnant)",
            Self::Negative => "Negative (Not Pregnant)",
            Self::Invalid => "Invalid (Retest)",
        }
    }
}

// =============================================================================
// KIND
// =============================================================================

pub(crate) struct Urine(pub UrineMode);

impl KindSpec for Urine {
    type Output = Vec<UrineFinding>;

    fn kind(&self) -> AnalysisKind {
        match self.0 {
            UrineMode::Standard => AnalysisKind::Urine,
            UrineMode::Pregnancy => AnalysisKind::Pregnancy,
        }
    }

    fn instruction(&self) -> &'static str {
        match self.0 {
            UrineMode::Standard => STANDARD_INSTRUCTION,
            UrineMode::Pregnancy => PREGNANCY_INSTRUCTION,
        }
    }

    fn schema(&self) -> Value {
        schema::array_of(schema::object(&[
            ("parameter", schema::string(None)),
            ("finding", schema::string(None)),
            ("interpretation", schema::string(None)),
            ("severity", schema::string_enum(&UrineSeverity::ALL)),
            ("advice", schema::string(None)),
        ]))
    }

    fn finish(&self, raw: Vec<UrineFinding>) -> Result<Vec<UrineFinding>, String> {
        match (self.0, raw.len()) {
            (_, 0) => Err("expected at least one finding, got none".to_string()),
            (UrineMode::Pregnancy, n) if n != 1 => Err(format!("pregnancy mode expects exactly one finding, got {n}")),
            _ => Ok(raw),
        }
    }
}

#[cfg(test)]
#[path = "urine_test.rs"]
mod tests;
