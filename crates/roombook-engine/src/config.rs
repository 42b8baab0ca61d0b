//! Engine settings.
//!
//! Everything has a default, so an empty JSON object (or no file at all) is a
//! valid configuration.

use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// IANA timezone of the rooms' location; reservation times are local to it.
    pub timezone: String,
    /// How occurrences inside a DST gap are converted to instants.
    pub dst_policy: DstPolicy,
    /// A repeating booking shorter than this many days is never heavy.
    pub heavy_min_days: i64,
    /// Booked hours per 30 days at which a repeating booking becomes heavy.
    pub heavy_hours_per_month: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            dst_policy: DstPolicy::default(),
            heavy_min_days: 30,
            heavy_hours_per_month: 15.0,
        }
    }
}

impl EngineSettings {
    /// # Errors
    /// Returns `EngineError::Config` if `json` is not a valid settings object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
