//! Coverage gap inputs

use serde::{Deserialize, Serialize};

/// Statutory limit on the sick-pay lump, in months
pub const SICK_PAY_MAX_MONTHS: u32 = 18;

/// Planner-entered assumptions for sizing a coverage gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageInputs {
    /// Household spending before the event (yen/year)
    pub prior_annual_spending: f64,

    /// Survivor household spending as a share of prior spending
    pub survivor_spending_ratio: f64,

    /// Disabled household spending as a share of prior spending (at least 1.0)
    pub disability_spending_ratio: f64,

    /// Share of the continuing earner's work income that keeps coming in
    pub work_income_ratio: f64,

    /// Continuing earner's retirement age
    pub work_end_age: u32,

    /// Savings available to cover shortfalls (yen)
    pub savings: f64,

    /// Monthly sick pay from the health insurer (disability only)
    pub sick_pay_monthly: f64,

    /// Months of sick pay to count; never more than 18
    pub sick_pay_cap_months: u32,

    /// Funeral cost added to the net shortfall (survivor only)
    pub funeral_cost: f64,

    /// Extra yearly cost per child still under `child_cost_until_age`
    pub child_cost_per_year: f64,

    pub child_cost_until_age: u32,

    /// Rows stop before this subject age
    pub horizon_age: u32,
}

impl Default for CoverageInputs {
    fn default() -> Self {
        Self {
            prior_annual_spending: 0.0,
            survivor_spending_ratio: 0.7,
            disability_spending_ratio: 1.1,
            work_income_ratio: 1.0,
            work_end_age: 65,
            savings: 0.0,
            sick_pay_monthly: 0.0,
            sick_pay_cap_months: SICK_PAY_MAX_MONTHS,
            funeral_cost: 0.0,
            child_cost_per_year: 0.0,
            child_cost_until_age: 22,
            horizon_age: 100,
        }
    }
}

impl CoverageInputs {
    /// Clamp out-of-range entries to the nearest valid value
    pub fn sanitized(&self) -> Self {
        let mut clean = self.clone();
        clean.prior_annual_spending = non_negative(self.prior_annual_spending);
        clean.survivor_spending_ratio = non_negative(self.survivor_spending_ratio);
        clean.disability_spending_ratio = non_negative(self.disability_spending_ratio).max(1.0);
        clean.work_income_ratio = non_negative(self.work_income_ratio);
        clean.savings = non_negative(self.savings);
        clean.sick_pay_monthly = non_negative(self.sick_pay_monthly);
        clean.sick_pay_cap_months = self.sick_pay_cap_months.min(SICK_PAY_MAX_MONTHS);
        clean.funeral_cost = non_negative(self.funeral_cost);
        clean.child_cost_per_year = non_negative(self.child_cost_per_year);

        if clean != *self {
            log::warn!("coverage inputs out of range were clamped");
        }
        clean
    }

    /// Sick pay available as one lump
    pub fn sick_pay_lump(&self) -> f64 {
        non_negative(self.sick_pay_monthly) * self.sick_pay_cap_months.min(SICK_PAY_MAX_MONTHS) as f64
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
