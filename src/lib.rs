//! QuickMed Nepal: offline calculators and AI-assisted image checks.

pub mod analysis;
pub mod calc;
pub mod error;
pub mod llm;
pub mod reference;
pub mod render;
pub mod state;
