use super::*;

fn item(finding: &str, severity: UrineSeverity) -> UrineFinding {
    UrineFinding {
        parameter: "HCG Pregnancy Test".into(),
        finding: finding.into(),
        interpretation: String::new(),
        severity,
        advice: String::new(),
    }
}

#[test]
fn severity_enum_accepts_exact_values() {
    for name in UrineSeverity::ALL {
        let parsed: UrineSeverity = serde_json::from_str(&format!("\"{name}\"")).unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), format!("\"{name}\""));
    }
}

#[test]
fn severity_enum_rejects_other_values() {
    assert!(serde_json::from_str::<UrineSeverity>("\"Low\"").is_err());
    assert!(serde_json::from_str::<UrineSeverity>("\"normal\"").is_err());
}

#[test]
fn schema_is_array_of_closed_objects_with_severity_enum() {
    let s = Urine(UrineMode::Standard).schema();
    assert_eq!(s["type"], "array");
    assert_eq!(s["items"]["properties"]["severity"]["enum"], serde_json::json!(UrineSeverity::ALL));
    assert_eq!(s["items"]["required"].as_array().unwrap().len(), 5);
}

#[test]
fn modes_use_different_instructions_and_kinds() {
    let standard = Urine(UrineMode::Standard);
    let pregnancy = Urine(UrineMode::Pregnancy);
    assert!(pregnancy.instruction().contains("Control Line (C)"));
    assert!(standard.instruction().contains("dipstick"));
    assert_eq!(standard.kind(), AnalysisKind::Urine);
    assert_eq!(pregnancy.kind(), AnalysisKind::Pregnancy);
}

#[test]
fn finish_rejects_empty_list() {
    assert!(Urine(UrineMode::Standard).finish(Vec::new()).is_err());
}

#[test]
fn finish_pregnancy_requires_exactly_one() {
    let two = vec![item("Positive", UrineSeverity::Positive), item("Negative", UrineSeverity::Negative)];
    let err = Urine(UrineMode::Pregnancy).finish(two.clone()).unwrap_err();
    assert!(err.contains("exactly one"));
    assert_eq!(Urine(UrineMode::Standard).finish(two).unwrap().len(), 2);
}

#[test]
fn hcg_reading_prefers_severity() {
    assert_eq!(HcgReading::from_finding(&item("Faint", UrineSeverity::Positive)), HcgReading::Positive);
    assert_eq!(HcgReading::from_finding(&item("Positive", UrineSeverity::Invalid)), HcgReading::Invalid);
}

#[test]
fn hcg_reading_falls_back_to_finding_text() {
    assert_eq!(HcgReading::from_finding(&item("Positive", UrineSeverity::Normal)), HcgReading::Positive);
    assert_eq!(HcgReading::from_finding(&item("Negative", UrineSeverity::Normal)), HcgReading::Negative);
    assert_eq!(HcgReading::from_finding(&item("unclear", UrineSeverity::Normal)), HcgReading::Invalid);
}

#[test]
fn fallback_and_failed_have_one_item() {
    assert_eq!(UrineFinding::fallback().len(), 1);
    assert_eq!(UrineFinding::fallback()[0].interpretation, "API Key missing");
    assert_eq!(UrineFinding::failed()[0].parameter, "Error");
}

#[test]
fn mode_parses_lowercase() {
    let mode: UrineMode = serde_json::from_str("\"pregnancy\"").unwrap();
    assert_eq!(mode, UrineMode::Pregnancy);
    assert_eq!(UrineMode::default(), UrineMode::Standard);
}
