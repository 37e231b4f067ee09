//! Statutory coefficients and eligibility thresholds

mod rates;
mod rules;
pub mod loader;

pub use rates::PensionRates;
pub use rules::EligibilityRules;
pub use loader::LoadedTables;

use std::path::Path;

use crate::error::{PlannerError, Result};

/// Container for everything the core reads besides the household itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assumptions {
    pub rates: PensionRates,
    pub rules: EligibilityRules,
}

impl Assumptions {
    /// FY2025 coefficients with the standard thresholds
    pub fn fiscal_2025() -> Self {
        Self {
            rates: PensionRates::fiscal_2025(),
            rules: EligibilityRules::default(),
        }
    }

    /// Load overrides from CSV files in the default location (data/rates/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RATES_PATH))
    }

    /// Load overrides from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedTables::load_from(path)?;
        Self::fiscal_2025().with_overrides(&loaded)
    }

    /// Apply loaded rows on top of these values
    pub fn with_overrides(mut self, loaded: &LoadedTables) -> Result<Self> {
        for (key, value) in &loaded.rates {
            let parsed: f64 = loader::parse_value(key, value)?;
            if parsed < 0.0 {
                return Err(PlannerError::InvalidRateValue {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
            if !self.rates.set(key, parsed) {
                return Err(PlannerError::UnknownRateKey(key.clone()));
            }
        }
        for (key, value) in &loaded.rules {
            let parsed: u32 = loader::parse_value(key, value)?;
            if !self.rules.set(key, parsed) {
                return Err(PlannerError::UnknownRateKey(key.clone()));
            }
        }
        Ok(self)
    }
}
