//! Benefit formula library
//!
//! Annual yen amounts for each benefit family. Every function is total: negative
//! months or remuneration clamp to 0 and nothing here rounds. Rounding belongs to
//! display code so that amounts do not drift across segments.

use crate::assumptions::Assumptions;
use super::types::{BenefitComponents, DisabilityLevel};

/// Formula library bound to a set of coefficients
#[derive(Debug, Clone, Copy)]
pub struct Formulas<'a> {
    assumptions: &'a Assumptions,
}

impl<'a> Formulas<'a> {
    pub fn new(assumptions: &'a Assumptions) -> Self {
        Self { assumptions }
    }

    // ========================================================================
    // CHILD ADDITIONS
    // ========================================================================

    /// Child additions: the first two children at the higher rate, the rest at the third-child rate
    pub fn child_additions(&self, eligible_children: u32) -> f64 {
        let rates = &self.assumptions.rates;
        let first_two = eligible_children.min(2) as f64;
        let rest = eligible_children.saturating_sub(2) as f64;
        first_two * rates.child_addition_first_second + rest * rates.child_addition_third_plus
    }

    // ========================================================================
    // SURVIVOR
    // ========================================================================

    /// Survivor basic pension for a spouse raising `eligible_children`
    pub fn survivor_basic(&self, eligible_children: u32) -> f64 {
        self.survivor_basic_components(eligible_children).total()
    }

    pub fn survivor_basic_components(&self, eligible_children: u32) -> BenefitComponents {
        if eligible_children == 0 {
            return BenefitComponents::default();
        }
        BenefitComponents {
            basic: self.assumptions.rates.basic_full,
            child_addition: self.child_additions(eligible_children),
            ..Default::default()
        }
    }

    /// Survivor basic pension paid to the children themselves when no spouse survives.
    /// The first child is the recipient, so additions start from the second.
    pub fn orphan_basic(&self, eligible_children: u32) -> f64 {
        self.orphan_basic_components(eligible_children).total()
    }

    pub fn orphan_basic_components(&self, eligible_children: u32) -> BenefitComponents {
        if eligible_children == 0 {
            return BenefitComponents::default();
        }
        let rates = &self.assumptions.rates;
        let additions = if eligible_children >= 2 {
            rates.child_addition_first_second
                + (eligible_children - 2) as f64 * rates.child_addition_third_plus
        } else {
            0.0
        };
        BenefitComponents {
            basic: rates.basic_full,
            child_addition: additions,
            ..Default::default()
        }
    }

    /// Three quarters of the deceased's proportional amount, with the optional 300-month floor
    pub fn survivor_employee_proportional(&self, avg_monthly: f64, months: f64, deemed_300: bool) -> f64 {
        self.proportional(avg_monthly, self.effective_months(months, deemed_300))
            * self.assumptions.rates.survivor_factor
    }

    /// Flat mid-life widow addition; eligibility is the evaluator's concern
    pub fn midlife_widow_addition(&self) -> f64 {
        self.assumptions.rates.midlife_widow_addition
    }

    // ========================================================================
    // DISABILITY
    // ========================================================================

    pub fn disability_basic(&self, level: DisabilityLevel, eligible_children: u32) -> f64 {
        self.disability_basic_components(level, eligible_children).total()
    }

    pub fn disability_basic_components(&self, level: DisabilityLevel, eligible_children: u32) -> BenefitComponents {
        let rates = &self.assumptions.rates;
        let basic = match level {
            DisabilityLevel::One => rates.basic_full * rates.disability_level1_multiplier,
            DisabilityLevel::Two => rates.basic_full,
            DisabilityLevel::Three => return BenefitComponents::default(),
        };
        BenefitComponents {
            basic,
            child_addition: self.child_additions(eligible_children),
            ..Default::default()
        }
    }

    /// Disability employee pension. `spousal_addition` is only added below level 3.
    pub fn disability_employee(
        &self,
        level: DisabilityLevel,
        spousal_addition: f64,
        avg_monthly: f64,
        months: f64,
        deemed_300: bool,
    ) -> f64 {
        self.disability_employee_components(level, spousal_addition, avg_monthly, months, deemed_300)
            .total()
    }

    pub fn disability_employee_components(
        &self,
        level: DisabilityLevel,
        spousal_addition: f64,
        avg_monthly: f64,
        months: f64,
        deemed_300: bool,
    ) -> BenefitComponents {
        let rates = &self.assumptions.rates;
        let proportional = self.proportional(avg_monthly, self.effective_months(months, deemed_300));
        let (employee, spousal) = match level {
            DisabilityLevel::One => (proportional * rates.disability_level1_multiplier, spousal_addition.max(0.0)),
            DisabilityLevel::Two => (proportional, spousal_addition.max(0.0)),
            DisabilityLevel::Three => (proportional.max(rates.disability_level3_minimum), 0.0),
        };
        BenefitComponents {
            employee_proportional: employee,
            spousal_addition: spousal,
            ..Default::default()
        }
    }

    /// Statutory spousal addition amount
    pub fn spousal_addition(&self) -> f64 {
        self.assumptions.rates.spousal_addition
    }

    // ========================================================================
    // OLD-AGE
    // ========================================================================

    /// Full-contribution old-age basic pension
    pub fn old_age_basic(&self) -> f64 {
        self.assumptions.rates.basic_full
    }

    /// Own old-age employee pension; no 300-month floor applies
    pub fn old_age_employee(&self, avg_monthly: f64, months: f64) -> f64 {
        self.proportional(avg_monthly, months)
    }

    /// Multiplier for claiming at `claim_age` instead of the standard age
    pub fn deferral_factor(&self, claim_age: u32) -> f64 {
        let rates = &self.assumptions.rates;
        let standard = self.assumptions.rules.standard_claim_age;
        if claim_age < standard {
            let months = f64::from(standard - claim_age) * 12.0;
            1.0 - (months * rates.early_reduction_per_month).min(rates.early_reduction_cap)
        } else if claim_age > standard {
            let months = f64::from(claim_age - standard) * 12.0;
            1.0 + (months * rates.late_increase_per_month).min(rates.late_increase_cap)
        } else {
            1.0
        }
    }

    pub fn deferral_adjust(&self, base_amount: f64, claim_age: u32) -> f64 {
        base_amount.max(0.0) * self.deferral_factor(claim_age)
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn effective_months(&self, months: f64, deemed_300: bool) -> f64 {
        let months = months.max(0.0);
        if deemed_300 {
            months.max(self.assumptions.rates.deemed_months)
        } else {
            months
        }
    }

    fn proportional(&self, avg_monthly: f64, months: f64) -> f64 {
        avg_monthly.max(0.0) * months.max(0.0) * self.assumptions.rates.proportional_rate
    }
}
