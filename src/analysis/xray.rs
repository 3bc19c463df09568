//! X-ray analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema;
use super::{AnalysisKind, KindSpec};

const INSTRUCTION: &str = "Analyze this medical X-ray image. Identify the body part and any obvious abnormalities \
(fractures, opacity). Educational only.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XrayResult {
    pub body_part: String,
    pub findings: String,
    pub impression: String,
    /// Reported by the model on its own; not cross-checked against `findings`.
    pub abnormality_detected: bool,
    pub advice: String,
}

impl XrayResult {
    /// Placeholder for an error card after a failed analysis.
    #[must_use]
    pub fn error_card() -> Self {
        Self {
            body_part: "Unknown".into(),
            findings: "Analysis failed".into(),
            impression: "Error".into(),
            abnormality_detected: false,
            advice: "Consult a radiologist.".into(),
        }
    }
}

pub(crate) struct Xray;

impl KindSpec for Xray {
    type Output = XrayResult;

    fn kind(&self) -> AnalysisKind {
        AnalysisKind::Xray
    }

    fn instruction(&self) -> &'static str {
        INSTRUCTION
    }

    fn schema(&self) -> Value {
        schema::object(&[
            ("bodyPart", schema::string(Some("The body part shown (e.g. Chest, Hand, Knee)."))),
            ("findings", schema::string(Some("Key visual findings (e.g. clear lungs, hairline fracture)."))),
            ("impression", schema::string(Some("Educational summary."))),
            ("abnormalityDetected", schema::boolean(None)),
            ("advice", schema::string(None)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_result() {
        let raw: XrayResult = schema::parse(
            r#"{"bodyPart":"Hand","findings":"hairline fracture of 5th metacarpal","impression":"fracture","abnormalityDetected":true,"advice":"See an orthopaedist"}"#,
        )
        .unwrap();
        assert!(raw.abnormality_detected);
        assert_eq!(raw.body_part, "Hand");
    }

    #[test]
    fn rejects_non_boolean_flag() {
        let res = schema::parse::<XrayResult>(
            r#"{"bodyPart":"Chest","findings":"clear","impression":"normal","abnormalityDetected":"no","advice":"none"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn rejects_missing_advice() {
        let res = schema::parse::<XrayResult>(
            r#"{"bodyPart":"Chest","findings":"clear","impression":"normal","abnormalityDetected":false}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn schema_declares_boolean_flag() {
        assert_eq!(Xray.schema()["properties"]["abnormalityDetected"]["type"], "boolean");
    }
}
