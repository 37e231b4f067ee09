//! Constant-amount timeline segments

use serde::{Deserialize, Serialize};

use crate::benefits::BenefitComponents;

/// A run of ages with one benefit amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First age covered
    pub start_age: u32,

    /// First age not covered
    pub end_age: u32,

    /// Annual amount throughout the segment (yen)
    pub annual_amount: f64,

    /// Human-readable phase
    pub label: String,

    pub components: BenefitComponents,
}

impl Segment {
    /// Number of whole years covered
    pub fn years(&self) -> u32 {
        self.end_age - self.start_age
    }

    pub fn contains(&self, age: u32) -> bool {
        age >= self.start_age && age < self.end_age
    }

    /// Amount paid over the whole segment
    pub fn total(&self) -> f64 {
        self.annual_amount * self.years() as f64
    }
}
