//! Static reference data: medicines, emergency contacts, transport options,
//! and the disclaimer shown with every medical output.

use serde::Serialize;

use crate::calc::CalcError;

pub const DISCLAIMER_TEXT: &str = "⚠️ Medical Disclaimer: This tool is for educational and informational purposes only. It does not constitute medical advice, diagnosis, or treatment. Always verify dosages with a qualified healthcare professional and check the medicine packaging. In emergencies, contact local emergency services immediately.";

// =============================================================================
// MEDICINES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: &'static str,
    pub name: &'static str,
    pub default_concentration_mg: f64,
    pub default_volume_ml: f64,
    pub per_kg_min: f64,
    pub per_kg_max: f64,
    /// Absolute adult cap; generally lower for children by weight.
    pub max_daily_dose_mg: f64,
    pub frequency_hours: u32,
    pub description: &'static str,
    pub citation: &'static str,
    pub link: &'static str,
}

pub const MEDICINES: [Medicine; 2] = [
    Medicine {
        id: "paracetamol_syrup",
        name: "Paracetamol (Syrup)",
        default_concentration_mg: 120.0,
        default_volume_ml: 5.0,
        per_kg_min: 10.0,
        per_kg_max: 15.0,
        max_daily_dose_mg: 4000.0,
        frequency_hours: 4,
        description: "Pain reliever and fever reducer.",
        citation: "NHS / Medscape",
        link: "https://www.nhs.uk/medicines/paracetamol-for-children/",
    },
    Medicine {
        id: "ibuprofen_syrup",
        name: "Ibuprofen (Syrup)",
        default_concentration_mg: 100.0,
        default_volume_ml: 5.0,
        per_kg_min: 5.0,
        per_kg_max: 10.0,
        max_daily_dose_mg: 2400.0,
        frequency_hours: 6,
        description: "Anti-inflammatory for pain and fever.",
        citation: "NHS / BNF",
        link: "https://www.nhs.uk/medicines/ibuprofen-for-children/",
    },
];

/// Look up a medicine by id, or by the drug name alone (`"ibuprofen"`).
///
/// # Errors
///
/// Returns [`CalcError::UnknownMedicine`] when nothing matches.
pub fn find_medicine(query: &str) -> Result<&'static Medicine, CalcError> {
    let q = query.trim().to_ascii_lowercase();
    MEDICINES
        .iter()
        .find(|m| m.id == q || m.id.split('_').next() == Some(q.as_str()))
        .ok_or_else(|| CalcError::UnknownMedicine(query.to_string()))
}

// =============================================================================
// EMERGENCY CONTACTS (Nepal)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContactKind {
    Emergency,
    PoisonControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub number: &'static str,
    pub kind: ContactKind,
}

pub const EMERGENCY_CONTACTS: [EmergencyContact; 4] = [
    EmergencyContact { name: "Police", number: "100", kind: ContactKind::Emergency },
    EmergencyContact { name: "Ambulance", number: "102", kind: ContactKind::Emergency },
    EmergencyContact { name: "Teaching Hospital (TUTH)", number: "01-4412303", kind: ContactKind::PoisonControl },
    EmergencyContact { name: "Patan Hospital", number: "01-5522295", kind: ContactKind::PoisonControl },
];

// =============================================================================
// TRANSPORT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransportOption {
    pub id: &'static str,
    pub name: &'static str,
    pub price: &'static str,
    pub eta: &'static str,
    pub features: &'static str,
}

pub const TRANSPORT_OPTIONS: [TransportOption; 3] = [
    TransportOption {
        id: "basic",
        name: "Basic Ambulance",
        price: "Rs. 1,500",
        eta: "5-8 min",
        features: "Stretcher, First Aid",
    },
    TransportOption {
        id: "oxygen",
        name: "Oxygen Support",
        price: "Rs. 2,500",
        eta: "10-12 min",
        features: "Oxygen Cylinder, Nurse",
    },
    TransportOption {
        id: "icu",
        name: "ICU / Ventilator",
        price: "Rs. 5,000+",
        eta: "15-20 min",
        features: "Ventilator, Doctor, ICU",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_medicine_by_id_and_short_name() {
        assert_eq!(find_medicine("paracetamol_syrup").unwrap().name, "Paracetamol (Syrup)");
        assert_eq!(find_medicine("Ibuprofen").unwrap().id, "ibuprofen_syrup");
    }

    #[test]
    fn find_medicine_unknown() {
        assert!(matches!(find_medicine("aspirin"), Err(CalcError::UnknownMedicine(q)) if q == "aspirin"));
    }

    #[test]
    fn medicine_table_values() {
        let para = &MEDICINES[0];
        assert_eq!((para.per_kg_min, para.per_kg_max), (10.0, 15.0));
        assert_eq!(para.max_daily_dose_mg, 4000.0);
        assert_eq!(para.frequency_hours, 4);
        let ibu = &MEDICINES[1];
        assert_eq!((ibu.default_concentration_mg, ibu.default_volume_ml), (100.0, 5.0));
        assert_eq!(ibu.max_daily_dose_mg, 2400.0);
        assert_eq!(ibu.frequency_hours, 6);
    }

    #[test]
    fn emergency_numbers() {
        let numbers: Vec<&str> = EMERGENCY_CONTACTS.iter().map(|c| c.number).collect();
        assert_eq!(numbers, ["100", "102", "01-4412303", "01-5522295"]);
    }
}
