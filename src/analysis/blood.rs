//! Blood typing slide analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema;
use super::{AnalysisKind, KindSpec};
use crate::calc::compatibility::BloodType;

pub const UNKNOWN_GROUP: &str = "Unknown";

const INSTRUCTION: &str = "Analyze this image of a blood typing slide test. Identify clumping patterns. \
Deduce blood group. Educational only.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodResult {
    /// One of the eight ABO/Rh groups, or `"Unknown"`.
    #[serde(default)]
    pub blood_group: String,
    /// 0–100.
    pub confidence: f64,
    pub antibodies: String,
    pub agglutination_details: String,
    pub recommendation: String,
}

impl BloodResult {
    /// Returned without calling the provider when no credential is configured.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            blood_group: UNKNOWN_GROUP.into(),
            confidence: 0.0,
            antibodies: "Cannot determine without API Key".into(),
            agglutination_details: "Please configure a valid API Key to use the AI analysis feature. Returning mock data."
                .into(),
            recommendation: "Consult a lab technician.".into(),
        }
    }

    /// Returned when the provider call or its parse fails.
    #[must_use]
    pub fn failed() -> Self {
        Self { agglutination_details: "Analysis failed. Please try again.".into(), ..Self::fallback() }
    }

    /// Antigen letters shown on the red cells: every character of the group
    /// except `A` and `B` is dropped, and an empty result reads `"None"`.
    #[must_use]
    pub fn antigens(&self) -> String {
        let letters: String = self
            .blood_group
            .chars()
            .filter(|c| matches!(c, 'A' | 'B'))
            .collect();
        if letters.is_empty() { "None".to_string() } else { letters }
    }

    /// The parsed group, when it is one of the eight known types.
    #[must_use]
    pub fn blood_type(&self) -> Option<BloodType> {
        self.blood_group.parse().ok()
    }
}

/// Canonicalise a model-reported group; anything unrecognised is `"Unknown"`.
fn normalize_group(raw: &str) -> String {
    raw.parse::<BloodType>()
        .map_or_else(|_| UNKNOWN_GROUP.to_string(), |t| t.as_str().to_string())
}

pub(crate) struct BloodSlide;

impl KindSpec for BloodSlide {
    type Output = BloodResult;

    fn kind(&self) -> AnalysisKind {
        AnalysisKind::BloodSlide
    }

    fn instruction(&self) -> &'static str {
        INSTRUCTION
    }

    fn schema(&self) -> Value {
        schema::object(&[
            ("bloodGroup", schema::string(Some("The probable blood group (e.g., A+, B-, O+)."))),
            ("confidence", schema::number(Some("Confidence level between 0 and 100."))),
            ("antibodies", schema::string(Some("Likely antibodies present in plasma based on the group."))),
            ("agglutinationDetails", schema::string(Some("Description of visual clumping patterns."))),
            ("recommendation", schema::string(Some("Safety recommendation."))),
        ])
    }

    fn finish(&self, mut raw: BloodResult) -> Result<BloodResult, String> {
        raw.blood_group = normalize_group(&raw.blood_group);
        raw.confidence = schema::clamp_percent(raw.confidence);
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_group(group: &str) -> BloodResult {
        BloodResult { blood_group: group.into(), ..BloodResult::fallback() }
    }

    #[test]
    fn antigens_keep_only_a_and_b() {
        assert_eq!(with_group("AB+").antigens(), "AB");
        assert_eq!(with_group("A-").antigens(), "A");
        assert_eq!(with_group("B+").antigens(), "B");
    }

    #[test]
    fn antigens_empty_reads_none() {
        assert_eq!(with_group("O-").antigens(), "None");
        assert_eq!(with_group("Unknown").antigens(), "None");
    }

    #[test]
    fn normalize_canonicalises_known_groups() {
        assert_eq!(normalize_group(" ab+ "), "AB+");
        assert_eq!(normalize_group("O-"), "O-");
    }

    #[test]
    fn normalize_unknown_or_empty_is_unknown() {
        assert_eq!(normalize_group(""), UNKNOWN_GROUP);
        assert_eq!(normalize_group("Type A"), UNKNOWN_GROUP);
    }

    #[test]
    fn finish_clamps_confidence() {
        let raw = BloodResult { confidence: 130.0, ..with_group("A+") };
        let done = BloodSlide.finish(raw).unwrap();
        assert!((done.confidence - 100.0).abs() < f64::EPSILON);
        assert_eq!(done.blood_type(), Some(BloodType::APos));
    }

    #[test]
    fn missing_group_deserializes_as_unknown_after_finish() {
        let raw: BloodResult = serde_json::from_str(
            r#"{"confidence":50,"antibodies":"x","agglutinationDetails":"y","recommendation":"z"}"#,
        )
        .unwrap();
        assert_eq!(BloodSlide.finish(raw).unwrap().blood_group, UNKNOWN_GROUP);
    }

    #[test]
    fn failed_differs_from_fallback_only_in_details() {
        let failed = BloodResult::failed();
        assert_eq!(failed.agglutination_details, "Analysis failed. Please try again.");
        assert_eq!(failed.blood_group, UNKNOWN_GROUP);
        assert!(failed.confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn schema_lists_all_fields_as_required() {
        let s = BloodSlide.schema();
        assert_eq!(
            s["required"],
            serde_json::json!(["bloodGroup", "confidence", "antibodies", "agglutinationDetails", "recommendation"])
        );
    }
}
