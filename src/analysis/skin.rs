//! Skin lesion / rash analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema;
use super::{AnalysisKind, KindSpec};

const INSTRUCTION: &str =
    "Analyze this skin image. Identify potential dermatological conditions. Educational use only. Be cautious.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkinSeverity {
    Mild,
    Moderate,
    Severe,
    Unknown,
}

impl SkinSeverity {
    pub const ALL: [&'static str; 4] = ["Mild", "Moderate", "Severe", "Unknown"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinResult {
    pub condition: String,
    /// 0–100.
    pub probability: f64,
    pub description: String,
    pub severity: SkinSeverity,
    pub recommendation: String,
}

impl SkinResult {
    /// Placeholder for an error card after a failed analysis.
    #[must_use]
    pub fn error_card() -> Self {
        Self {
            condition: "Error".into(),
            probability: 0.0,
            description: "Analysis failed".into(),
            severity: SkinSeverity::Unknown,
            recommendation: "Consult a doctor.".into(),
        }
    }
}

pub(crate) struct Skin;

impl KindSpec for Skin {
    type Output = SkinResult;

    fn kind(&self) -> AnalysisKind {
        AnalysisKind::Skin
    }

    fn instruction(&self) -> &'static str {
        INSTRUCTION
    }

    fn schema(&self) -> Value {
        schema::object(&[
            (
                "condition",
                schema::string(Some("Name of the potential skin condition (e.g. Eczema, Ringworm, Acne).")),
            ),
            ("probability", schema::number(Some("Confidence score 0-100."))),
            ("description", schema::string(Some("Visual description of the rash/lesion."))),
            ("severity", schema::string_enum(&SkinSeverity::ALL)),
            ("recommendation", schema::string(Some("Home care advice or 'See Doctor'."))),
        ])
    }

    fn finish(&self, mut raw: SkinResult) -> Result<SkinResult, String> {
        raw.probability = schema::clamp_percent(raw.probability);
        Ok(raw)
    }
}
