//! Benefit formula library and result types

mod formulas;
mod types;

pub use formulas::Formulas;
pub use types::{BenefitComponents, BenefitResult, ComponentKind, DisabilityLevel};
