//! CSV-based rate table loader
//!
//! Loads coefficient overrides from `key,value` CSV files in data/rates/

use std::fs::File;
use std::path::Path;

use crate::error::{PlannerError, Result};

/// Default path to the rates directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

/// File holding `PensionRates` overrides
pub const RATES_FILE: &str = "pension_rates.csv";

/// File holding `EligibilityRules` overrides
pub const RULES_FILE: &str = "eligibility_rules.csv";

/// Load `key,value` rows from a CSV file with a header line
pub fn load_key_values(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path).map_err(|source| PlannerError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let key = record.get(0).unwrap_or_default().trim().to_string();
        let value = record.get(1).unwrap_or_default().trim().to_string();
        if key.is_empty() || key.starts_with('#') {
            continue;
        }
        rows.push((key, value));
    }

    Ok(rows)
}

/// Parse a numeric cell, attaching the key on failure
pub fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| PlannerError::InvalidRateValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Raw rows from both rate files. A missing file means "no overrides".
pub struct LoadedTables {
    pub rates: Vec<(String, String)>,
    pub rules: Vec<(String, String)>,
}

impl LoadedTables {
    /// Load tables from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_RATES_PATH))
    }

    /// Load tables from a specific directory
    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(Self {
            rates: load_optional(&dir.join(RATES_FILE))?,
            rules: load_optional(&dir.join(RULES_FILE))?,
        })
    }
}

fn load_optional(path: &Path) -> Result<Vec<(String, String)>> {
    if path.exists() {
        load_key_values(path)
    } else {
        log::debug!("no rate table at {}, using defaults", path.display());
        Ok(Vec::new())
    }
}
