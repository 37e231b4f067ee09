//! Benefit result types

use serde::{Deserialize, Serialize};

/// Certified disability grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DisabilityLevel {
    One,
    Two,
    Three,
}

impl DisabilityLevel {
    /// Map a numeric grade; anything but 1-3 has no entitlement
    pub fn from_grade(grade: u8) -> Option<Self> {
        match grade {
            1 => Some(DisabilityLevel::One),
            2 => Some(DisabilityLevel::Two),
            3 => Some(DisabilityLevel::Three),
            _ => None,
        }
    }

    pub fn grade(&self) -> u8 {
        match self {
            DisabilityLevel::One => 1,
            DisabilityLevel::Two => 2,
            DisabilityLevel::Three => 3,
        }
    }

    /// Levels 1 and 2 carry the basic tier and the spousal addition
    pub fn has_basic_tier(&self) -> bool {
        !matches!(self, DisabilityLevel::Three)
    }
}

/// Named parts of an annual benefit amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitComponents {
    /// Flat-rate tier (survivor, disability or old-age basic pension)
    pub basic: f64,

    /// Earnings-proportional tier
    pub employee_proportional: f64,

    /// Child additions on the basic tier
    pub child_addition: f64,

    /// Spousal addition on the disability employee pension
    pub spousal_addition: f64,

    /// Mid-life widow addition
    pub midlife_widow_addition: f64,
}

/// Identifies one component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Basic,
    EmployeeProportional,
    ChildAddition,
    SpousalAddition,
    MidlifeWidowAddition,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Basic => "basic",
            ComponentKind::EmployeeProportional => "employee",
            ComponentKind::ChildAddition => "child addition",
            ComponentKind::SpousalAddition => "spousal addition",
            ComponentKind::MidlifeWidowAddition => "mid-life widow addition",
        }
    }
}

impl BenefitComponents {
    /// Sum of all parts
    pub fn total(&self) -> f64 {
        self.basic
            + self.employee_proportional
            + self.child_addition
            + self.spousal_addition
            + self.midlife_widow_addition
    }

    /// True when no part carries an amount
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Non-zero parts in display order
    pub fn entries(&self) -> Vec<(ComponentKind, f64)> {
        [
            (ComponentKind::Basic, self.basic),
            (ComponentKind::EmployeeProportional, self.employee_proportional),
            (ComponentKind::ChildAddition, self.child_addition),
            (ComponentKind::SpousalAddition, self.spousal_addition),
            (ComponentKind::MidlifeWidowAddition, self.midlife_widow_addition),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount > 0.0)
        .collect()
    }
}

/// Annual entitlement at one age
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitResult {
    pub total: f64,
    pub components: BenefitComponents,
}

impl BenefitResult {
    pub fn from_components(components: BenefitComponents) -> Self {
        Self {
            total: components.total(),
            components,
        }
    }

    /// Explicit zero entitlement
    pub fn zero() -> Self {
        Self::default()
    }
}
