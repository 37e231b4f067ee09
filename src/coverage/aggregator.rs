//! Coverage gap aggregation
//!
//! Year-by-year target spending against income, followed by the lump-sum
//! deduction pipeline (sick pay, then savings) and the funeral cost.

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::eligibility::{EligibilityEvaluator, Scenario};
use crate::timeline::Timeline;
use super::allowance::child_allowance;
use super::inputs::CoverageInputs;

/// One simulated year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRow {
    /// Subject age
    pub age: u32,

    // Income
    pub benefit_income: f64,
    pub child_allowance: f64,
    pub work_income: f64,
    pub total_income: f64,

    // Spending
    pub target_spending: f64,

    // Gap before deductions
    pub shortfall: f64,
    pub surplus: f64,

    // Deductions allocated to this year
    pub sick_pay_deduction: f64,
    pub savings_deduction: f64,
}

impl CoverageRow {
    /// Shortfall left after both deduction stages
    pub fn remaining_shortfall(&self) -> f64 {
        (self.shortfall - self.sick_pay_deduction - self.savings_deduction).max(0.0)
    }
}

/// Rows plus pipeline totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    pub rows: Vec<CoverageRow>,

    /// Sum of undeducted yearly shortfalls
    pub total_shortfall: f64,
    pub total_surplus: f64,

    /// Sick pay lump offered to the pipeline, and the part of it allocated
    pub sick_pay_lump: f64,
    pub sick_pay_applied: f64,

    pub savings_applied: f64,
    pub funeral_cost: f64,

    /// `max(0, total_shortfall - deductions) + funeral_cost`
    pub net_shortfall: f64,
}

/// Spread `lump` over years in proportion to each year's share of the
/// undeducted shortfall, capped at what is still uncovered in that year.
/// The allocations never sum to more than `lump`.
pub fn distribute(lump: f64, undeducted: &[f64], remaining: &[f64]) -> Vec<f64> {
    let total: f64 = undeducted.iter().sum();
    if lump <= 0.0 || total <= 0.0 {
        return vec![0.0; undeducted.len()];
    }
    undeducted
        .iter()
        .zip(remaining)
        .map(|(&share, &left)| (lump * share / total).min(left.max(0.0)))
        .collect()
}

/// Aggregate the coverage gap for a scenario over its timeline
pub fn aggregate(
    assumptions: &Assumptions,
    scenario: &Scenario,
    timeline: &Timeline,
    inputs: &CoverageInputs,
) -> CoverageResult {
    let inputs = inputs.sanitized();
    let evaluator = EligibilityEvaluator::new(assumptions, scenario);
    let current_age = timeline.current_age;
    let end_age = inputs.horizon_age.min(timeline.terminal_age);

    let spending_ratio = if scenario.event.is_survivor() {
        inputs.survivor_spending_ratio
    } else {
        inputs.disability_spending_ratio
    };
    let earner = evaluator.continuing_earner();

    let mut rows: Vec<CoverageRow> = (current_age..end_age.max(current_age))
        .map(|age| {
            let years = age - current_age;
            let child_ages: Vec<u32> = scenario
                .household
                .children
                .iter()
                .map(|child| child.age.saturating_add(years))
                .collect();

            let benefit_income = timeline.amount_at(age);
            let allowance = child_allowance(assumptions, &child_ages);
            let work_income = earner
                .filter(|person| person.age_after(years) < inputs.work_end_age)
                .map(|person| person.annual_work_income * inputs.work_income_ratio)
                .unwrap_or(0.0);
            let total_income = benefit_income + allowance + work_income;

            let children_in_cost = child_ages
                .iter()
                .filter(|&&age| age < inputs.child_cost_until_age)
                .count() as f64;
            let target_spending =
                inputs.prior_annual_spending * spending_ratio + inputs.child_cost_per_year * children_in_cost;

            CoverageRow {
                age,
                benefit_income,
                child_allowance: allowance,
                work_income,
                total_income,
                target_spending,
                shortfall: (target_spending - total_income).max(0.0),
                surplus: (total_income - target_spending).max(0.0),
                sick_pay_deduction: 0.0,
                savings_deduction: 0.0,
            }
        })
        .collect();

    let undeducted: Vec<f64> = rows.iter().map(|row| row.shortfall).collect();
    let total_shortfall: f64 = undeducted.iter().sum();
    let total_surplus: f64 = rows.iter().map(|row| row.surplus).sum();

    // Stage 1: sick pay
    let sick_pay_lump = if scenario.event.is_disability() {
        inputs.sick_pay_lump()
    } else {
        0.0
    };
    let sick_pay = distribute(sick_pay_lump, &undeducted, &undeducted);
    for (row, amount) in rows.iter_mut().zip(&sick_pay) {
        row.sick_pay_deduction = *amount;
    }

    // Stage 2: savings
    let remaining: Vec<f64> = rows.iter().map(CoverageRow::remaining_shortfall).collect();
    let savings = distribute(inputs.savings, &undeducted, &remaining);
    for (row, amount) in rows.iter_mut().zip(&savings) {
        row.savings_deduction = *amount;
    }

    let sick_pay_applied: f64 = sick_pay.iter().sum();
    let savings_applied: f64 = savings.iter().sum();
    let funeral_cost = if scenario.event.is_survivor() {
        inputs.funeral_cost
    } else {
        0.0
    };
    let net_shortfall = (total_shortfall - sick_pay_applied - savings_applied).max(0.0) + funeral_cost;

    log::debug!(
        "coverage for {}: shortfall {:.0}, sick pay {:.0}/{:.0}, savings {:.0}/{:.0}, net {:.0}",
        scenario.event.tag(),
        total_shortfall,
        sick_pay_applied,
        sick_pay_lump,
        savings_applied,
        inputs.savings,
        net_shortfall
    );

    CoverageResult {
        rows,
        total_shortfall,
        total_surplus,
        sick_pay_lump,
        sick_pay_applied,
        savings_applied,
        funeral_cost,
        net_shortfall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benefits::DisabilityLevel;
    use crate::eligibility::Event;
    use crate::household::{Child, Household, Person};
    use crate::timeline::{build_timeline, TimelineOptions};
    use proptest::prelude::*;

    fn couple() -> Household {
        Household::couple(
            Person::new(38, 450_000.0, 300, true).with_work_income(6_000_000.0),
            Person::new(35, 220_000.0, 96, false).with_work_income(1_200_000.0),
            vec![Child::new(3)],
        )
    }

    fn run(event: Event, inputs: &CoverageInputs) -> CoverageResult {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = Scenario::new(event, couple());
        let timeline = build_timeline(&assumptions, &scenario, &TimelineOptions::default());
        aggregate(&assumptions, &scenario, &timeline, inputs)
    }

    #[test]
    fn test_distribute_proportional_and_capped() {
        let allocated = distribute(300.0, &[100.0, 300.0, 0.0], &[100.0, 300.0, 0.0]);
        assert!((allocated[0] - 75.0).abs() < 1e-9);
        assert!((allocated[1] - 225.0).abs() < 1e-9);
        assert_eq!(allocated[2], 0.0);

        // More than enough: each year is capped at its shortfall
        let allocated = distribute(1_000.0, &[100.0, 300.0], &[100.0, 300.0]);
        assert_eq!(allocated, vec![100.0, 300.0]);

        // Remaining caps tighter than the share
        let allocated = distribute(400.0, &[100.0, 300.0], &[10.0, 300.0]);
        assert_eq!(allocated[0], 10.0);
        assert!(allocated.iter().sum::<f64>() <= 400.0);
    }

    #[test]
    fn test_rows_cover_horizon() {
        let inputs = CoverageInputs {
            prior_annual_spending: 4_800_000.0,
            horizon_age: 70,
            ..Default::default()
        };
        let result = run(Event::SurvivorHusbandDies, &inputs);
        assert_eq!(result.rows.len(), 35);
        assert_eq!(result.rows[0].age, 35);
        // Wife keeps working until 65, the child allowance runs while the child is under 18
        assert!((result.rows[0].work_income - 1_200_000.0).abs() < 1e-6);
        assert_eq!(result.rows[30].work_income, 0.0);
        assert_eq!(result.rows[0].child_allowance, 120_000.0);
        assert_eq!(result.rows[20].child_allowance, 0.0);
    }

    #[test]
    fn test_funeral_only_for_survivors_and_sick_pay_only_for_disability() {
        let inputs = CoverageInputs {
            prior_annual_spending: 6_000_000.0,
            funeral_cost: 1_500_000.0,
            sick_pay_monthly: 250_000.0,
            ..Default::default()
        };

        let survivor = run(Event::SurvivorHusbandDies, &inputs);
        assert_eq!(survivor.funeral_cost, 1_500_000.0);
        assert_eq!(survivor.sick_pay_applied, 0.0);

        let disability = run(Event::DisabilityHusband(DisabilityLevel::Two), &inputs);
        assert_eq!(disability.funeral_cost, 0.0);
        assert!((disability.sick_pay_lump - 4_500_000.0).abs() < 1e-6);
        assert!(disability.sick_pay_applied <= disability.sick_pay_lump + 1e-6);
    }

    #[test]
    fn test_net_shortfall_formula() {
        let inputs = CoverageInputs {
            prior_annual_spending: 5_000_000.0,
            savings: 2_000_000.0,
            funeral_cost: 1_000_000.0,
            ..Default::default()
        };
        let result = run(Event::SurvivorHusbandDies, &inputs);
        let expected = (result.total_shortfall - result.savings_applied - result.sick_pay_applied).max(0.0) + 1_000_000.0;
        assert!((result.net_shortfall - expected).abs() < 1e-6);
        assert!(result.savings_applied <= 2_000_000.0 + 1e-6);
        for row in &result.rows {
            assert!(row.sick_pay_deduction + row.savings_deduction <= row.shortfall + 1e-6);
        }
    }

    proptest! {
        #[test]
        fn prop_shortfall_and_surplus_exclusive(spending in 0u32..12_000_000) {
            let inputs = CoverageInputs {
                prior_annual_spending: spending as f64,
                ..Default::default()
            };
            let result = run(Event::DisabilityWife(DisabilityLevel::One), &inputs);
            for row in &result.rows {
                prop_assert!(!(row.shortfall > 0.0 && row.surplus > 0.0));
            }
        }

        #[test]
        fn prop_net_shortfall_non_increasing_in_savings(
            spending in 3_000_000u32..10_000_000,
            savings in 0u32..50_000_000,
            extra in 1u32..20_000_000,
        ) {
            let base = CoverageInputs {
                prior_annual_spending: spending as f64,
                savings: savings as f64,
                sick_pay_monthly: 200_000.0,
                ..Default::default()
            };
            let richer = CoverageInputs {
                savings: savings as f64 + extra as f64,
                ..base.clone()
            };
            let event = Event::DisabilityHusband(DisabilityLevel::Two);
            prop_assert!(run(event, &richer).net_shortfall <= run(event, &base).net_shortfall + 1e-6);
        }
    }
}
