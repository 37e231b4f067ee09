//! Planner façade
//!
//! Pre-loads the statutory tables once, then answers benefit, timeline and
//! coverage questions for any number of scenarios without re-reading CSV files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::benefits::{BenefitResult, DisabilityLevel};
use crate::coverage::{self, CoverageInputs, CoverageResult};
use crate::eligibility::{EligibilityEvaluator, Event, PolicyMode, Scenario};
use crate::error::Result;
use crate::household::Household;
use crate::timeline::{self, Timeline, TimelineOptions};

/// Timeline for one event of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTimeline {
    pub event: Event,
    pub policy: PolicyMode,
    pub timeline: Timeline,
}

/// Pre-loaded planner
///
/// # Example
/// ```ignore
/// let planner = Planner::from_csv()?;
/// let scenario = Scenario::new(Event::SurvivorHusbandDies, household);
/// let timeline = planner.build_timeline(&scenario);
/// let gap = planner.compute_coverage_gap(&scenario, &CoverageInputs::default());
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    assumptions: Assumptions,
    options: TimelineOptions,
}

impl Planner {
    /// Planner with the in-memory FY2025 tables
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::fiscal_2025())
    }

    /// Planner with tables loaded from the default rates directory
    pub fn from_csv() -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv()?))
    }

    /// Planner with tables loaded from a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv_path(path)?))
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            assumptions,
            options: TimelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TimelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Entitlement at one subject age, priced with the same old-age plan the timeline uses
    pub fn compute_benefit(&self, scenario: &Scenario, age: u32) -> BenefitResult {
        let evaluator = EligibilityEvaluator::new(&self.assumptions, scenario);
        let (plan, _) = timeline::choose_plan(&evaluator, &self.options);
        evaluator.evaluate(age, plan)
    }

    /// Segmented timeline from the subject's current age to the terminal age
    pub fn build_timeline(&self, scenario: &Scenario) -> Timeline {
        timeline::build_timeline(&self.assumptions, scenario, &self.options)
    }

    /// Yearly coverage rows and the net insurance shortfall
    pub fn compute_coverage_gap(&self, scenario: &Scenario, inputs: &CoverageInputs) -> CoverageResult {
        let timeline = self.build_timeline(scenario);
        coverage::aggregate(&self.assumptions, scenario, &timeline, inputs)
    }

    /// Timelines for every event that can apply to the household
    pub fn run_all_events(&self, household: &Household, policy: PolicyMode, level: DisabilityLevel) -> Vec<EventTimeline> {
        Event::applicable_to(household, level)
            .into_iter()
            .map(|event| {
                let scenario = Scenario::new(event, household.clone()).with_policy(policy);
                EventTimeline {
                    event,
                    policy,
                    timeline: self.build_timeline(&scenario),
                }
            })
            .collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Mutable tables for what-if overrides
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.assumptions
    }

    pub fn options(&self) -> &TimelineOptions {
        &self.options
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}
