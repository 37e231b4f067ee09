//! Statutory child allowance

use crate::assumptions::Assumptions;

/// Annual child allowance for children of the given ages.
///
/// Children count in birth order among those still under the cutoff; the third
/// and later get the third-child rate, the others the under-3 or standard rate.
pub fn child_allowance(assumptions: &Assumptions, child_ages: &[u32]) -> f64 {
    let rates = &assumptions.rates;
    let mut eligible: Vec<u32> = child_ages
        .iter()
        .copied()
        .filter(|&age| assumptions.rules.child_eligible(age))
        .collect();
    eligible.sort_unstable_by(|a, b| b.cmp(a));

    eligible
        .iter()
        .enumerate()
        .map(|(rank, &age)| {
            if rank >= 2 {
                rates.child_allowance_third_plus
            } else if age < 3 {
                rates.child_allowance_under3
            } else {
                rates.child_allowance_standard
            }
        })
        .sum()
}
