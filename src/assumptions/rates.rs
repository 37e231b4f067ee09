//! Statutory benefit coefficients
//!
//! Annual yen amounts and rates for the simplified two-tier schedule. Defaults are
//! the FY2025 published values; every field can be overridden from the rate table.

use serde::{Deserialize, Serialize};

/// Coefficients used by the formula library and the child allowance schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionRates {
    /// Full old-age basic pension (40 contribution years)
    pub basic_full: f64,

    /// Child addition for the first and second child
    pub child_addition_first_second: f64,

    /// Child addition for each child from the third on
    pub child_addition_third_plus: f64,

    /// Spousal addition on the disability employee pension
    pub spousal_addition: f64,

    /// Flat mid-life widow addition
    pub midlife_widow_addition: f64,

    /// Floor for the level 3 disability employee pension
    pub disability_level3_minimum: f64,

    /// Earnings-proportional accrual rate per enrolled month
    pub proportional_rate: f64,

    /// Share of the deceased's proportional amount paid to survivors
    pub survivor_factor: f64,

    /// Multiplier applied to level 1 disability amounts
    pub disability_level1_multiplier: f64,

    /// Enrolled-months floor used when the deemed-300 flag is set
    pub deemed_months: f64,

    /// Reduction per month claimed before the standard age
    pub early_reduction_per_month: f64,

    /// Maximum total early reduction
    pub early_reduction_cap: f64,

    /// Increase per month claimed after the standard age
    pub late_increase_per_month: f64,

    /// Maximum total deferral increase
    pub late_increase_cap: f64,

    /// Annual child allowance for a child under 3
    pub child_allowance_under3: f64,

    /// Annual child allowance for a child aged 3 up to the cutoff
    pub child_allowance_standard: f64,

    /// Annual child allowance for the third and later eligible child
    pub child_allowance_third_plus: f64,
}

impl PensionRates {
    /// FY2025 statutory values
    pub fn fiscal_2025() -> Self {
        Self {
            basic_full: 831_700.0,
            child_addition_first_second: 239_300.0,
            child_addition_third_plus: 79_800.0,
            spousal_addition: 239_300.0,
            midlife_widow_addition: 623_800.0,
            disability_level3_minimum: 623_800.0,
            proportional_rate: 0.005481,
            survivor_factor: 0.75,
            disability_level1_multiplier: 1.25,
            deemed_months: 300.0,
            early_reduction_per_month: 0.004,
            early_reduction_cap: 0.24,
            late_increase_per_month: 0.007,
            late_increase_cap: 0.84,
            child_allowance_under3: 180_000.0,
            child_allowance_standard: 120_000.0,
            child_allowance_third_plus: 360_000.0,
        }
    }

    /// Set a coefficient by its table key. Returns false for an unknown key.
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        let slot = match key {
            "basic_full" => &mut self.basic_full,
            "child_addition_first_second" => &mut self.child_addition_first_second,
            "child_addition_third_plus" => &mut self.child_addition_third_plus,
            "spousal_addition" => &mut self.spousal_addition,
            "midlife_widow_addition" => &mut self.midlife_widow_addition,
            "disability_level3_minimum" => &mut self.disability_level3_minimum,
            "proportional_rate" => &mut self.proportional_rate,
            "survivor_factor" => &mut self.survivor_factor,
            "disability_level1_multiplier" => &mut self.disability_level1_multiplier,
            "deemed_months" => &mut self.deemed_months,
            "early_reduction_per_month" => &mut self.early_reduction_per_month,
            "early_reduction_cap" => &mut self.early_reduction_cap,
            "late_increase_per_month" => &mut self.late_increase_per_month,
            "late_increase_cap" => &mut self.late_increase_cap,
            "child_allowance_under3" => &mut self.child_allowance_under3,
            "child_allowance_standard" => &mut self.child_allowance_standard,
            "child_allowance_third_plus" => &mut self.child_allowance_third_plus,
            _ => return false,
        };
        *slot = value;
        true
    }
}

impl Default for PensionRates {
    fn default() -> Self {
        Self::fiscal_2025()
    }
}
