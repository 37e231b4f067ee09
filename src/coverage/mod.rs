//! Coverage gap: how much private insurance the household would need

pub mod aggregator;
pub mod allowance;
pub mod inputs;

pub use aggregator::{aggregate, CoverageResult, CoverageRow};
pub use allowance::child_allowance;
pub use inputs::CoverageInputs;
