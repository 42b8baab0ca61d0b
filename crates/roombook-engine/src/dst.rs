//! DST transition policies for converting local occurrences to instants.

use serde::{Deserialize, Serialize};

/// Policy for occurrences whose local start or end falls in a DST gap
/// (e.g. 02:30 on the night clocks spring forward).
///
/// Local times repeated when clocks fall back are always read as the earlier
/// instant; the policy only decides what happens to times that never exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop occurrences that fall in the DST gap.
    Skip,
    /// Move to the first valid local time after the gap.
    ShiftForward,
    /// Keep the wall-clock reading and apply the offset in force before the gap.
    #[default]
    WallClock,
}
