//! Weight-based pediatric dose calculator.
//!
//! `dose = weight × mg/kg`, computed for the low and high end of the
//! medicine's range; volume follows from the syrup concentration.

use serde::Serialize;

use super::CalcError;
use crate::reference::Medicine;

pub const UNSAFE_DOSE_WARNING: &str = "Calculated dose exceeds general maximum limits. Consult a doctor.";

/// Syrup strength: `mg` of drug per `ml` of liquid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Concentration {
    pub mg: f64,
    pub ml: f64,
}

impl Concentration {
    #[must_use]
    pub fn default_for(medicine: &Medicine) -> Self {
        Self { mg: medicine.default_concentration_mg, ml: medicine.default_volume_ml }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseResult {
    pub single_dose_mg_min: f64,
    pub single_dose_mg_max: f64,
    pub volume_ml_min: f64,
    pub volume_ml_max: f64,
    pub max_daily_dose: f64,
    pub safe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Compute the single-dose range for `weight_kg`.
///
/// Milligrams are rounded to whole numbers, millilitres to one decimal. The
/// dose is flagged unsafe when the unrounded high-end dose exceeds the
/// medicine's absolute daily cap.
///
/// # Errors
///
/// Returns [`CalcError::InvalidWeight`] or [`CalcError::InvalidConcentration`]
/// for non-finite or non-positive input.
pub fn calculate(medicine: &Medicine, weight_kg: f64, concentration: Concentration) -> Result<DoseResult, CalcError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(CalcError::InvalidWeight(weight_kg));
    }
    let Concentration { mg, ml } = concentration;
    if !mg.is_finite() || !ml.is_finite() || mg <= 0.0 || ml <= 0.0 {
        return Err(CalcError::InvalidConcentration { mg, ml });
    }

    let dose_min = weight_kg * medicine.per_kg_min;
    let dose_max = weight_kg * medicine.per_kg_max;
    let vol_min = dose_min / mg * ml;
    let vol_max = dose_max / mg * ml;

    let safe = dose_max <= medicine.max_daily_dose_mg;

    Ok(DoseResult {
        single_dose_mg_min: dose_min.round(),
        single_dose_mg_max: dose_max.round(),
        volume_ml_min: round1(vol_min),
        volume_ml_max: round1(vol_max),
        max_daily_dose: medicine.max_daily_dose_mg,
        safe,
        warning: (!safe).then(|| UNSAFE_DOSE_WARNING.to_string()),
    })
}

/// Plain-text report suitable for pasting into a message.
#[must_use]
pub fn report(medicine: &Medicine, weight_kg: f64, concentration: Concentration, result: &DoseResult) -> String {
    format!(
        "QuickMed Dose Report:\nPatient Weight: {weight_kg}kg\nMedicine: {} ({}mg/{}ml)\nSafe Dose: {}ml - {}ml ({}-{}mg)\nFrequency: Every {} hours.",
        medicine.name,
        concentration.mg,
        concentration.ml,
        result.volume_ml_min,
        result.volume_ml_max,
        result.single_dose_mg_min,
        result.single_dose_mg_max,
        medicine.frequency_hours,
    )
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "dose_test.rs"]
mod tests;
