//! Age thresholds driving eligibility
//!
//! These are the ages at which entitlements begin, end or are suspended. The
//! evaluator reads every cutoff from here rather than from literals.

use serde::{Deserialize, Serialize};

/// Age thresholds for eligibility rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRules {
    /// A child is eligible while strictly younger than this age
    pub child_cutoff_age: u32,

    /// Timelines end (exclusive) at this age
    pub terminal_age: u32,

    /// Age at which old-age pension is paid unadjusted
    pub standard_claim_age: u32,

    /// Earliest permitted old-age claim age
    pub earliest_claim_age: u32,

    /// Latest permitted old-age claim age
    pub latest_claim_age: u32,

    /// Widow whose child-free period starts before this age gets a fixed term
    pub widow_fixed_term_age: u32,

    /// Length of a fixed-term survivor employee pension in years
    pub fixed_term_years: u32,

    /// Widower younger than this at the death is disqualified
    pub widower_disqualification_age: u32,

    /// Widower's survivor employee pension resumes at this age
    pub widower_resume_age: u32,

    /// Mid-life widow addition window start (inclusive)
    pub midlife_start_age: u32,

    /// Mid-life widow addition window end (exclusive)
    pub midlife_end_age: u32,

    /// Disability spousal addition stops when the spouse reaches this age
    pub spousal_addition_end_age: u32,

    /// Revised mode: survivor whose child-free period starts before this age gets a fixed term
    pub revised_fixed_term_age: u32,
}

impl EligibilityRules {
    /// Set a threshold by its table key. Returns false for an unknown key.
    pub fn set(&mut self, key: &str, value: u32) -> bool {
        let slot = match key {
            "child_cutoff_age" => &mut self.child_cutoff_age,
            "terminal_age" => &mut self.terminal_age,
            "standard_claim_age" => &mut self.standard_claim_age,
            "earliest_claim_age" => &mut self.earliest_claim_age,
            "latest_claim_age" => &mut self.latest_claim_age,
            "widow_fixed_term_age" => &mut self.widow_fixed_term_age,
            "fixed_term_years" => &mut self.fixed_term_years,
            "widower_disqualification_age" => &mut self.widower_disqualification_age,
            "widower_resume_age" => &mut self.widower_resume_age,
            "midlife_start_age" => &mut self.midlife_start_age,
            "midlife_end_age" => &mut self.midlife_end_age,
            "spousal_addition_end_age" => &mut self.spousal_addition_end_age,
            "revised_fixed_term_age" => &mut self.revised_fixed_term_age,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Clamp a claim age into the permitted window
    pub fn clamp_claim_age(&self, claim_age: u32) -> u32 {
        claim_age.clamp(self.earliest_claim_age, self.latest_claim_age)
    }

    /// Whether a child of this age is eligible for child-linked benefits
    pub fn child_eligible(&self, child_age: u32) -> bool {
        child_age < self.child_cutoff_age
    }
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            child_cutoff_age: 18,
            terminal_age: 100,
            standard_claim_age: 65,
            earliest_claim_age: 60,
            latest_claim_age: 75,
            widow_fixed_term_age: 30,
            fixed_term_years: 5,
            widower_disqualification_age: 55,
            widower_resume_age: 60,
            midlife_start_age: 40,
            midlife_end_age: 65,
            spousal_addition_end_age: 65,
            revised_fixed_term_age: 60,
        }
    }
}
