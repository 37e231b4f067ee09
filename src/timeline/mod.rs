//! Benefit timeline
//!
//! Builds the segmented entitlement timeline for a scenario: the evaluator
//! supplies breakpoints and selectors, the deferral optimizer picks the old-age
//! plan, and the segmenter tiles `[current age, terminal)`.

pub mod breakpoints;
pub mod deferral;
pub mod segment;
pub mod segmenter;

pub use breakpoints::{Breakpoint, BreakpointReason};
pub use deferral::{DeferralOutcome, DeferralPattern};
pub use segment::Segment;

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::eligibility::{EligibilityEvaluator, OldAgePlan, Scenario};

/// Options for timeline construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineOptions {
    /// Search for a deferral switch when the claim age is the standard age
    pub optimize_deferral: bool,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            optimize_deferral: true,
        }
    }
}

/// Segmented entitlement timeline for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub current_age: u32,
    pub terminal_age: u32,
    pub plan: OldAgePlan,
    pub segments: Vec<Segment>,
    pub breakpoints: Vec<Breakpoint>,
    pub deferral: Option<DeferralOutcome>,
}

impl Timeline {
    /// Segment covering `age`
    pub fn segment_at(&self, age: u32) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.contains(age))
    }

    /// Annual amount at `age`; 0 outside the timeline
    pub fn amount_at(&self, age: u32) -> f64 {
        self.segment_at(age).map(|segment| segment.annual_amount).unwrap_or(0.0)
    }

    /// Sum of annual amounts over the whole timeline
    pub fn lifetime_total(&self) -> f64 {
        self.segments.iter().map(Segment::total).sum()
    }
}

/// Old-age plan for a scenario, and the optimizer outcome behind it
pub fn choose_plan(evaluator: &EligibilityEvaluator, options: &TimelineOptions) -> (OldAgePlan, Option<DeferralOutcome>) {
    if !options.optimize_deferral {
        return (OldAgePlan::Elected, None);
    }
    match deferral::optimize(evaluator) {
        Some(outcome) => (outcome.plan(), Some(outcome)),
        None => (OldAgePlan::Elected, None),
    }
}

/// Build the timeline for a scenario
pub fn build_timeline(assumptions: &Assumptions, scenario: &Scenario, options: &TimelineOptions) -> Timeline {
    let evaluator = EligibilityEvaluator::new(assumptions, scenario);
    let (plan, deferral) = choose_plan(&evaluator, options);

    let segments = segmenter::segment(&evaluator, plan);
    log::debug!(
        "timeline for {}: {} segments from age {}",
        scenario.event.tag(),
        segments.len(),
        evaluator.current_age()
    );

    Timeline {
        current_age: evaluator.current_age(),
        terminal_age: evaluator.terminal_age(),
        plan,
        segments,
        breakpoints: evaluator.breakpoints(plan),
        deferral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benefits::{DisabilityLevel, Formulas};
    use crate::eligibility::Event;
    use crate::household::{Child, Household, Person};
    use approx::assert_relative_eq;

    fn scenario_one() -> Scenario {
        Scenario::new(
            Event::SurvivorHusbandDies,
            Household::couple(
                Person::new(38, 450_000.0, 300, true),
                Person::new(35, 200_000.0, 60, false),
                vec![Child::new(3)],
            ),
        )
    }

    #[test]
    fn test_scenario_widow_with_young_child() {
        let assumptions = Assumptions::fiscal_2025();
        let f = Formulas::new(&assumptions);
        let timeline = build_timeline(&assumptions, &scenario_one(), &TimelineOptions::default());
        let survivor_employee = f.survivor_employee_proportional(450_000.0, 300.0, true);

        let first = &timeline.segments[0];
        assert_eq!((first.start_age, first.end_age), (35, 50));
        assert_relative_eq!(first.annual_amount, f.survivor_basic(1) + survivor_employee, epsilon = 1e-6);

        let second = &timeline.segments[1];
        assert_eq!((second.start_age, second.end_age), (50, 65));
        assert_relative_eq!(second.components.employee_proportional, survivor_employee, epsilon = 1e-6);
        assert_relative_eq!(second.components.midlife_widow_addition, 623_800.0);
        assert_eq!(second.components.basic, 0.0);
        assert_eq!(second.components.child_addition, 0.0);

        // Own record is small, so deferral only pays off late
        let switch_age = timeline.deferral.as_ref().and_then(|d| d.switch_age());
        assert_eq!(switch_age, Some(72));
        let third = &timeline.segments[2];
        assert_eq!((third.start_age, third.end_age), (65, 72));
        assert_relative_eq!(third.annual_amount, 831_700.0 + survivor_employee, epsilon = 1e-6);
        let fourth = &timeline.segments[3];
        assert_eq!((fourth.start_age, fourth.end_age), (72, 100));
        let own = 831_700.0 + f.old_age_employee(200_000.0, 60.0);
        assert_relative_eq!(fourth.annual_amount, own * f.deferral_factor(72), epsilon = 1e-6);
        assert_eq!(timeline.segments.len(), 4);
    }

    #[test]
    fn test_scenario_young_widower_without_children() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = Scenario::new(
            Event::SurvivorWifeDies,
            Household::couple(
                Person::new(40, 350_000.0, 240, false),
                Person::new(38, 300_000.0, 200, true),
                vec![],
            ),
        );
        let timeline = build_timeline(&assumptions, &scenario, &TimelineOptions::default());

        let first = &timeline.segments[0];
        assert_eq!((first.start_age, first.end_age), (40, 65));
        assert_eq!(first.annual_amount, 0.0);
        assert!(first.components.is_empty());
    }

    #[test]
    fn test_scenario_level3_single_disability() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = Scenario::new(
            Event::DisabilitySingle(DisabilityLevel::Three),
            Household::single(Person::new(45, 400_000.0, 200, false), vec![]),
        );
        let timeline = build_timeline(&assumptions, &scenario, &TimelineOptions::default());

        let first = &timeline.segments[0];
        let computed = 400_000.0 * 200.0 * 0.005481;
        assert_eq!(first.components.basic, 0.0);
        assert_relative_eq!(first.components.employee_proportional, f64::max(computed, 623_800.0));
    }

    #[test]
    fn test_scenario_own_pension_larger_switches_at_65() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = Scenario::new(
            Event::SurvivorHusbandDies,
            Household::couple(
                Person::new(52, 200_000.0, 120, true),
                Person::new(50, 500_000.0, 400, false),
                vec![],
            ),
        );
        let timeline = build_timeline(&assumptions, &scenario, &TimelineOptions::default());

        assert_eq!(timeline.deferral.as_ref().and_then(|d| d.switch_age()), Some(65));
        let tail = timeline.segment_at(65).unwrap();
        assert_eq!((tail.start_age, tail.end_age), (65, 100));
        assert_relative_eq!(tail.annual_amount, 831_700.0 + 500_000.0 * 400.0 * 0.005481, epsilon = 1e-6);
        assert_eq!(tail.components.spousal_addition, 0.0);
    }

    #[test]
    fn test_pattern_a_keeps_one_tail_segment() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = Scenario::new(
            Event::SurvivorHusbandDies,
            Household::couple(
                Person::new(62, 1_000_000.0, 480, false),
                Person::new(60, 100_000.0, 12, false),
                vec![],
            ),
        );
        let timeline = build_timeline(&assumptions, &scenario, &TimelineOptions::default());

        assert_eq!(timeline.deferral.as_ref().map(|d| d.pattern), Some(DeferralPattern::A));
        assert_eq!(timeline.plan, OldAgePlan::Elected);
        let tail = timeline.segment_at(65).unwrap();
        assert_eq!((tail.start_age, tail.end_age), (65, 100));
    }

    #[test]
    fn test_elected_late_claim_skips_optimizer() {
        let assumptions = Assumptions::fiscal_2025();
        let mut scenario = scenario_one();
        if let crate::household::Adults::Couple { wife, .. } = &mut scenario.household.adults {
            wife.claim_age = 70;
        }
        let timeline = build_timeline(&assumptions, &scenario, &TimelineOptions::default());

        assert!(timeline.deferral.is_none());
        // The mid-life widow addition stops at 65 even when the claim comes later
        assert_eq!(timeline.segment_at(67).map(|s| s.end_age), Some(70));
        assert_eq!(timeline.segment_at(67).unwrap().components.midlife_widow_addition, 0.0);
        assert_eq!(timeline.segment_at(70).map(|s| s.end_age), Some(100));
    }

    #[test]
    fn test_fixed_term_expiry_after_early_claim() {
        let assumptions = Assumptions::fiscal_2025();
        let f = Formulas::new(&assumptions);
        let scenario = Scenario::new(
            Event::SurvivorHusbandDies,
            Household::couple(
                Person::new(60, 450_000.0, 300, true),
                Person::new(57, 200_000.0, 60, false).with_claim_age(60),
                vec![],
            ),
        )
        .with_policy(crate::eligibility::PolicyMode::Revised);
        let timeline = build_timeline(&assumptions, &scenario, &TimelineOptions::default());
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);
        let survivor_employee = f.survivor_employee_proportional(450_000.0, 300.0, true);

        let bounds: Vec<(u32, u32)> = timeline.segments.iter().map(|s| (s.start_age, s.end_age)).collect();
        assert_eq!(bounds, vec![(57, 60), (60, 62), (62, 100)]);
        assert!(timeline
            .breakpoints
            .contains(&Breakpoint::new(62, BreakpointReason::FixedTermEnds)));

        // The derived survivor tier carries the crossover only until the fixed term ends
        assert_relative_eq!(
            timeline.segments[1].components.employee_proportional,
            survivor_employee,
            epsilon = 1e-6
        );
        assert!(timeline.segments[2].components.employee_proportional < survivor_employee);
        assert!(timeline.amount_at(62) < timeline.amount_at(61));

        for age in [57, 60, 61, 62, 70, 99] {
            let expected = evaluator.evaluate(age, timeline.plan).total;
            assert_relative_eq!(timeline.amount_at(age), expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_amount_at_outside_timeline() {
        let assumptions = Assumptions::fiscal_2025();
        let timeline = build_timeline(&assumptions, &scenario_one(), &TimelineOptions::default());
        assert_eq!(timeline.amount_at(20), 0.0);
        assert_eq!(timeline.amount_at(100), 0.0);
        assert!(timeline.lifetime_total() > 0.0);
        assert_eq!(timeline.breakpoints.first().map(|b| b.reason), Some(BreakpointReason::CurrentAge));
    }
}
