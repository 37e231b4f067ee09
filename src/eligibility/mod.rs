//! Eligibility rules: which benefits apply to whom, and when that changes

pub mod evaluator;
pub mod scenario;

pub use evaluator::{
    BasicTier, EligibilityEvaluator, EmployeeTier, FormulaSelector, OldAgeParts, OldAgePlan, Phase,
};
pub use scenario::{Event, PolicyMode, Scenario};
