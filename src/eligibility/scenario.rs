//! Scenario definitions: which insured event happened to which household

use serde::{Deserialize, Serialize};

use crate::benefits::DisabilityLevel;
use crate::household::Household;

/// Rule set applied by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolicyMode {
    /// Rules in force today
    #[default]
    Current,
    /// Hypothetical reform: fixed 5-year survivor benefits, no widower asymmetry
    Revised,
}

/// The insured event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Husband dies; the wife is the survivor
    SurvivorHusbandDies,
    /// Wife dies; the husband is the survivor
    SurvivorWifeDies,
    /// The only adult dies; the children are the survivors
    SurvivorSingle,
    DisabilityHusband(DisabilityLevel),
    DisabilityWife(DisabilityLevel),
    DisabilitySingle(DisabilityLevel),
}

impl Event {
    pub fn is_survivor(&self) -> bool {
        matches!(
            self,
            Event::SurvivorHusbandDies | Event::SurvivorWifeDies | Event::SurvivorSingle
        )
    }

    pub fn is_disability(&self) -> bool {
        !self.is_survivor()
    }

    /// Stable identifier, also accepted by the CLI
    pub fn tag(&self) -> &'static str {
        match self {
            Event::SurvivorHusbandDies => "survivor-husband-dies",
            Event::SurvivorWifeDies => "survivor-wife-dies",
            Event::SurvivorSingle => "survivor-single",
            Event::DisabilityHusband(_) => "disability-husband",
            Event::DisabilityWife(_) => "disability-wife",
            Event::DisabilitySingle(_) => "disability-single",
        }
    }

    /// Parse a tag; disability tags take the given level
    pub fn from_tag(tag: &str, level: DisabilityLevel) -> Option<Self> {
        match tag {
            "survivor-husband-dies" => Some(Event::SurvivorHusbandDies),
            "survivor-wife-dies" => Some(Event::SurvivorWifeDies),
            "survivor-single" => Some(Event::SurvivorSingle),
            "disability-husband" => Some(Event::DisabilityHusband(level)),
            "disability-wife" => Some(Event::DisabilityWife(level)),
            "disability-single" => Some(Event::DisabilitySingle(level)),
            _ => None,
        }
    }

    /// Every event that can apply to a household of this shape
    pub fn applicable_to(household: &Household, level: DisabilityLevel) -> Vec<Event> {
        if household.is_single() {
            vec![Event::SurvivorSingle, Event::DisabilitySingle(level)]
        } else {
            vec![
                Event::SurvivorHusbandDies,
                Event::SurvivorWifeDies,
                Event::DisabilityHusband(level),
                Event::DisabilityWife(level),
            ]
        }
    }
}

/// Immutable input to every core computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub event: Event,
    pub household: Household,
    #[serde(default)]
    pub policy: PolicyMode,
}

impl Scenario {
    pub fn new(event: Event, household: Household) -> Self {
        Self {
            event,
            household,
            policy: PolicyMode::Current,
        }
    }

    pub fn with_policy(mut self, policy: PolicyMode) -> Self {
        self.policy = policy;
        self
    }
}
