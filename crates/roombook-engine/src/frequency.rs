//! The closed set of repetition patterns a reservation can follow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How often a reservation repeats between its start and end dates.
///
/// Serialized with the short names used by booking forms and exports
/// (`"none"`, `"daily"`, `"weekly"`, `"everyTwoWeeks"`, `"everyThreeWeeks"`,
/// `"monthly"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepeatFrequency {
    /// A single window, no repetition.
    #[default]
    None,
    /// Every day.
    Daily,
    /// Every week on the weekday of the start date.
    Weekly,
    /// Every second week on the weekday of the start date.
    EveryTwoWeeks,
    /// Every third week on the weekday of the start date.
    EveryThreeWeeks,
    /// Once a month, on the same ordinal weekday as the start date
    /// (e.g. "3rd Tuesday").
    Monthly,
}

impl RepeatFrequency {
    pub const ALL: [RepeatFrequency; 6] = [
        RepeatFrequency::None,
        RepeatFrequency::Daily,
        RepeatFrequency::Weekly,
        RepeatFrequency::EveryTwoWeeks,
        RepeatFrequency::EveryThreeWeeks,
        RepeatFrequency::Monthly,
    ];

    /// Number of days between consecutive occurrences, for the patterns with
    /// a constant step. `None` and `Monthly` have no fixed step.
    pub fn interval_days(self) -> Option<i64> {
        match self {
            RepeatFrequency::Daily => Some(1),
            RepeatFrequency::Weekly => Some(7),
            RepeatFrequency::EveryTwoWeeks => Some(14),
            RepeatFrequency::EveryThreeWeeks => Some(21),
            RepeatFrequency::None | RepeatFrequency::Monthly => None,
        }
    }

    pub fn is_repeating(self) -> bool {
        self != RepeatFrequency::None
    }

    /// Whether occurrences are pinned to the weekday of the start date.
    pub fn is_weekday_bound(self) -> bool {
        matches!(
            self,
            RepeatFrequency::Weekly
                | RepeatFrequency::EveryTwoWeeks
                | RepeatFrequency::EveryThreeWeeks
                | RepeatFrequency::Monthly
        )
    }

    pub fn short_name(self) -> &'static str {
        match self {
            RepeatFrequency::None => "none",
            RepeatFrequency::Daily => "daily",
            RepeatFrequency::Weekly => "weekly",
            RepeatFrequency::EveryTwoWeeks => "everyTwoWeeks",
            RepeatFrequency::EveryThreeWeeks => "everyThreeWeeks",
            RepeatFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for RepeatFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RepeatFrequency::None => "Single day",
            RepeatFrequency::Daily => "Daily",
            RepeatFrequency::Weekly => "Once a week",
            RepeatFrequency::EveryTwoWeeks => "Once every 2 weeks",
            RepeatFrequency::EveryThreeWeeks => "Once every 3 weeks",
            RepeatFrequency::Monthly => "Once a month",
        };
        f.write_str(text)
    }
}

impl FromStr for RepeatFrequency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepeatFrequency::ALL
            .into_iter()
            .find(|freq| freq.short_name() == s)
            .ok_or_else(|| EngineError::UnknownFrequency(s.to_string()))
    }
}
