//! Breakpoints: ages at which a formula input changes

use serde::{Deserialize, Serialize};

/// Why an age is a breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakpointReason {
    /// Start of the timeline
    CurrentAge,
    /// Child at this index (birth order) reaches the cutoff age
    ChildAgesOut(usize),
    /// Fixed-term survivor employee pension ends
    FixedTermEnds,
    /// Subject reaches a threshold age (40, 60, 65, 75)
    SelfThreshold(u32),
    /// Spouse reaches the age at which the spousal addition stops
    SpouseThreshold(u32),
    /// Spouse claims their own old-age pension
    SpouseClaim,
    /// Subject claims their own old-age pension
    OldAgeClaim,
    /// Fully deferred old-age pension overtakes the continuing pension
    DeferralSwitch,
    /// End of the timeline
    Terminal,
}

impl BreakpointReason {
    /// Pre-old-age breakpoints are capped at the subject's claim age.
    /// A fixed-term end is not: the expiry removes the derived tier from
    /// the old-age crossover as well.
    pub fn is_pre_old_age(&self) -> bool {
        matches!(self, BreakpointReason::ChildAgesOut(_) | BreakpointReason::SelfThreshold(_))
    }
}

/// A candidate age from one of the independent breakpoint streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub age: u32,
    pub reason: BreakpointReason,
}

impl Breakpoint {
    pub fn new(age: u32, reason: BreakpointReason) -> Self {
        Self { age, reason }
    }
}

/// Apply the claim-age cap to pre-old-age candidates and keep those inside
/// `[current_age, terminal_age)`, ordered by age. Several reasons may share an age.
pub fn clip(
    candidates: &[Breakpoint],
    current_age: u32,
    claim_cap: Option<u32>,
    terminal_age: u32,
) -> Vec<Breakpoint> {
    let mut clipped: Vec<Breakpoint> = candidates
        .iter()
        .map(|bp| match claim_cap {
            Some(cap) if bp.reason.is_pre_old_age() => Breakpoint::new(bp.age.min(cap), bp.reason),
            _ => *bp,
        })
        .filter(|bp| bp.age >= current_age && bp.age < terminal_age)
        .collect();
    clipped.sort_by_key(|bp| bp.age);
    clipped
}

/// Union candidate streams into the ordered segment start ages.
///
/// Pre-old-age candidates are capped at `claim_cap`; everything is clipped to
/// `[current_age, terminal_age)`. The result always starts with `current_age`
/// (when it lies before the terminal age) and holds no duplicates.
pub fn resolve(
    candidates: &[Breakpoint],
    current_age: u32,
    claim_cap: Option<u32>,
    terminal_age: u32,
) -> Vec<u32> {
    let mut ages: Vec<u32> = clip(candidates, current_age, claim_cap, terminal_age)
        .into_iter()
        .map(|bp| bp.age)
        .collect();

    if current_age < terminal_age {
        ages.push(current_age);
    }
    ages.sort_unstable();
    ages.dedup();
    ages
}
