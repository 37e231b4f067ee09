//! Pension Timeline - Japanese public pension entitlements for financial planning
//!
//! This library provides:
//! - Survivor, disability and old-age benefit formulas (FY2025 coefficients)
//! - Scenario-driven eligibility rules under current and revised policy
//! - Segmented benefit timelines from today to age 100
//! - Deferral break-even search for the old-age tail
//! - Coverage gap sizing against post-event household spending

pub mod assumptions;
pub mod benefits;
pub mod coverage;
pub mod eligibility;
pub mod error;
pub mod household;
pub mod planner;
pub mod timeline;

// Re-export commonly used types
pub use assumptions::Assumptions;
pub use benefits::{BenefitComponents, BenefitResult, DisabilityLevel, Formulas};
pub use coverage::{CoverageInputs, CoverageResult, CoverageRow};
pub use eligibility::{Event, PolicyMode, Scenario};
pub use error::{PlannerError, Result};
pub use household::{Child, Household, Person};
pub use planner::{EventTimeline, Planner};
pub use timeline::{Segment, Timeline, TimelineOptions};
