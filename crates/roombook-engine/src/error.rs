//! Error types for roombook-engine operations.
//!
//! These are operational failures (bad input to a constructor, an unknown
//! timezone, an unparseable export). Booking problems a user should see are
//! reported as [`crate::validation::ValidationError`] values instead.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid period: start {start} is not before end {end}")]
    InvalidPeriod {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Unknown repeat frequency: {0}")]
    UnknownFrequency(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
