//! Deterministic calculators: pediatric dose, due date, blood compatibility.

pub mod compatibility;
pub mod dose;
pub mod due_date;

use crate::error::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error("weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),
    #[error("concentration must be positive, got {mg}mg/{ml}ml")]
    InvalidConcentration { mg: f64, ml: f64 },
    #[error("unknown medicine: {0}")]
    UnknownMedicine(String),
    #[error("unknown blood type: {0}")]
    UnknownBloodType(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl ErrorCode for CalcError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidWeight(_) => "E_INVALID_WEIGHT",
            Self::InvalidConcentration { .. } => "E_INVALID_CONCENTRATION",
            Self::UnknownMedicine(_) => "E_UNKNOWN_MEDICINE",
            Self::UnknownBloodType(_) => "E_UNKNOWN_BLOOD_TYPE",
            Self::InvalidDate(_) => "E_INVALID_DATE",
        }
    }
}
