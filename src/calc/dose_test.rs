use super::*;
use crate::reference::{MEDICINES, find_medicine};

fn paracetamol() -> &'static Medicine {
    find_medicine("paracetamol_syrup").unwrap()
}

#[test]
fn paracetamol_fifteen_kg_defaults() {
    let med = paracetamol();
    let r = calculate(med, 15.0, Concentration::default_for(med)).unwrap();
    assert_eq!(r.single_dose_mg_min, 150.0);
    assert_eq!(r.single_dose_mg_max, 225.0);
    assert_eq!(r.volume_ml_min, 6.3);
    assert_eq!(r.volume_ml_max, 9.4);
    assert_eq!(r.max_daily_dose, 4000.0);
    assert!(r.safe);
    assert!(r.warning.is_none());
}

#[test]
fn ibuprofen_twenty_kg_defaults() {
    let med = find_medicine("ibuprofen").unwrap();
    let r = calculate(med, 20.0, Concentration::default_for(med)).unwrap();
    assert_eq!((r.single_dose_mg_min, r.single_dose_mg_max), (100.0, 200.0));
    assert_eq!((r.volume_ml_min, r.volume_ml_max), (5.0, 10.0));
    assert!(r.safe);
}

#[test]
fn unsafe_when_high_dose_exceeds_daily_cap() {
    for med in &MEDICINES {
        // Just past the cap for the high end of the range.
        let weight = med.max_daily_dose_mg / med.per_kg_max + 1.0;
        let r = calculate(med, weight, Concentration::default_for(med)).unwrap();
        assert!(!r.safe, "{} at {weight}kg", med.id);
        assert!(r.warning.as_deref().is_some_and(|w| !w.is_empty()));
    }
}

#[test]
fn exactly_at_cap_is_safe() {
    let med = find_medicine("ibuprofen").unwrap();
    let r = calculate(med, 240.0, Concentration::default_for(med)).unwrap();
    assert!(r.safe);
}

#[test]
fn custom_concentration_changes_volume_only() {
    let med = paracetamol();
    let r = calculate(med, 10.0, Concentration { mg: 250.0, ml: 5.0 }).unwrap();
    assert_eq!((r.single_dose_mg_min, r.single_dose_mg_max), (100.0, 150.0));
    assert_eq!((r.volume_ml_min, r.volume_ml_max), (2.0, 3.0));
}

#[test]
fn rejects_bad_weight() {
    let med = paracetamol();
    for w in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(calculate(med, w, Concentration::default_for(med)), Err(CalcError::InvalidWeight(_))));
    }
}

#[test]
fn rejects_bad_concentration() {
    let med = paracetamol();
    let err = calculate(med, 10.0, Concentration { mg: 0.0, ml: 5.0 }).unwrap_err();
    assert!(matches!(err, CalcError::InvalidConcentration { .. }));
    let err = calculate(med, 10.0, Concentration { mg: 120.0, ml: -1.0 }).unwrap_err();
    assert!(matches!(err, CalcError::InvalidConcentration { .. }));
}

#[test]
fn report_text() {
    let med = paracetamol();
    let conc = Concentration::default_for(med);
    let r = calculate(med, 15.0, conc).unwrap();
    assert_eq!(
        report(med, 15.0, conc, &r),
        "QuickMed Dose Report:\nPatient Weight: 15kg\nMedicine: Paracetamol (Syrup) (120mg/5ml)\nSafe Dose: 6.3ml - 9.4ml (150-225mg)\nFrequency: Every 4 hours."
    );
}

#[test]
fn serializes_camel_case_without_warning_when_safe() {
    let med = paracetamol();
    let r = calculate(med, 15.0, Concentration::default_for(med)).unwrap();
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["singleDoseMgMin"], 150.0);
    assert_eq!(v["volumeMlMax"], 9.4);
    assert!(v.get("warning").is_none());
}
