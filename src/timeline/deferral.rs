//! Deferral optimizer for the old-age tail
//!
//! A claimant taking the old-age pension at the standard age keeps the larger of
//! the derived (survivor or disability) employee pension and their own. Giving up
//! the derived pension to defer their own pays off only from the first claim age
//! at which the fully deferred amount beats what they would otherwise keep
//! receiving at that age. The derived pension can shrink during the scan (a
//! spousal addition ends, a fixed term expires), so the continuing amount is
//! re-evaluated for each candidate age. The deferral factor moves in whole
//! months, so this is a bounded annual scan rather than a closed-form solve.

use serde::{Deserialize, Serialize};

use crate::benefits::Formulas;
use crate::eligibility::{EligibilityEvaluator, OldAgeParts, OldAgePlan};

/// Shape of the old-age tail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferralPattern {
    /// Deferral never pays off; one tail segment at the baseline
    A,
    /// Baseline until `switch_age`, fully deferred own pension from then on
    B { switch_age: u32 },
}

/// Result of the scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferralOutcome {
    pub pattern: DeferralPattern,

    /// `max(derived employee, own undeferred employee) + own basic` at the first scanned age
    pub baseline: f64,

    /// `derived employee + own basic` at the first scanned age: what deferring gives up
    pub continuing: f64,

    /// Fully deferred own pension for each scanned claim age
    pub deferred_totals: Vec<(u32, f64)>,
}

impl DeferralOutcome {
    pub fn switch_age(&self) -> Option<u32> {
        match self.pattern {
            DeferralPattern::A => None,
            DeferralPattern::B { switch_age } => Some(switch_age),
        }
    }

    /// Old-age plan that realizes this outcome
    pub fn plan(&self) -> OldAgePlan {
        match self.pattern {
            DeferralPattern::A => OldAgePlan::Elected,
            DeferralPattern::B { switch_age } => OldAgePlan::DeferralSwitch { switch_age },
        }
    }
}

fn continuing_at(parts: &OldAgeParts) -> f64 {
    parts.derived_employee + parts.own_basic
}

/// Scan claim ages `first..=last` with amounts that do not change over the scan
pub fn scan(parts: OldAgeParts, formulas: &Formulas, first: u32, last: u32) -> DeferralOutcome {
    scan_by_age(formulas, first, last, |_| parts)
}

/// Scan claim ages `first..=last` for the first age whose fully deferred total
/// beats the pension continuing at that age
pub fn scan_by_age<F>(formulas: &Formulas, first: u32, last: u32, parts_at: F) -> DeferralOutcome
where
    F: Fn(u32) -> OldAgeParts,
{
    let start = parts_at(first);
    let baseline = start.derived_employee.max(start.own_employee) + start.own_basic;
    let continuing = continuing_at(&start);

    let mut pattern = DeferralPattern::A;
    let mut deferred_totals = Vec::new();
    for claim_age in first..=last {
        let parts = parts_at(claim_age);
        let deferred = formulas.deferral_adjust(parts.own_basic + parts.own_employee, claim_age);
        if pattern == DeferralPattern::A && deferred > continuing_at(&parts) {
            pattern = DeferralPattern::B { switch_age: claim_age };
        }
        deferred_totals.push((claim_age, deferred));
    }

    DeferralOutcome {
        pattern,
        baseline,
        continuing,
        deferred_totals,
    }
}

/// Run the optimizer for a scenario. None when it does not apply: no own
/// old-age pensioner, or a claim age other than the standard age was elected.
pub fn optimize(evaluator: &EligibilityEvaluator) -> Option<DeferralOutcome> {
    if !evaluator.claims_at_standard_age() {
        return None;
    }
    let rules = &evaluator.assumptions().rules;
    let first = rules.standard_claim_age.max(evaluator.current_age());
    let start = evaluator.old_age_parts(first)?;

    let formulas = Formulas::new(evaluator.assumptions());
    let outcome = scan_by_age(&formulas, first, rules.latest_claim_age, |age| {
        evaluator.old_age_parts(age).unwrap_or(start)
    });
    log::debug!(
        "deferral scan for {}: baseline {:.0}, continuing {:.0}, pattern {:?}",
        evaluator.scenario().event.tag(),
        outcome.baseline,
        outcome.continuing,
        outcome.pattern
    );
    Some(outcome)
}
