//! Errors raised at the loading edges of the library
//!
//! The computation core never fails: out-of-range inputs are clamped and
//! unsatisfiable eligibility is a zero result. Only reading rate tables and
//! household profiles from disk can go wrong.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Profile JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown rate key '{0}'")]
    UnknownRateKey(String),

    #[error("Invalid value for '{key}': {value}")]
    InvalidRateValue { key: String, value: String },

    #[error("Profile contains no adult")]
    EmptyHousehold,

    #[error("Profile person has neither an age nor a birth date")]
    MissingAge,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
