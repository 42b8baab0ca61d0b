//! Local-to-UTC conversion of occurrences.
//!
//! Reservations are kept in the civil time of the room's location. Calendar
//! feeds and notifications need instants, which is where DST transitions come
//! in: see [`DstPolicy`].

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{EngineError, Result};
use crate::occurrence::occurrences;
use crate::period::Period;
use crate::reservation::Reservation;

/// How far past a nonexistent local time to look for the end of the gap.
const GAP_SEARCH_MINUTES: i64 = 180;

/// An occurrence as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

/// Convert a local period to UTC. `None` when `policy` is
/// [`DstPolicy::Skip`] and either endpoint falls in a DST gap.
pub fn to_utc(period: &Period, tz: Tz, policy: DstPolicy) -> Option<UtcPeriod> {
    Some(UtcPeriod {
        start: local_to_utc(period.start, tz, policy)?,
        end: local_to_utc(period.end, tz, policy)?,
    })
}

/// [`occurrences`] of `reservation`, converted to UTC in `timezone`.
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` if `timezone` is not a valid IANA
/// identifier.
pub fn occurrences_utc(
    reservation: &Reservation,
    until: Option<NaiveDate>,
    timezone: &str,
    policy: DstPolicy,
) -> Result<Vec<UtcPeriod>> {
    let tz = parse_timezone(timezone)?;
    Ok(occurrences(reservation, until)
        .iter()
        .filter_map(|period| to_utc(period, tz, policy))
        .collect())
}

pub(crate) fn local_to_utc(local: NaiveDateTime, tz: Tz, policy: DstPolicy) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Skip => None,
            DstPolicy::ShiftForward => (1..=GAP_SEARCH_MINUTES)
                .find_map(|minutes| {
                    tz.from_local_datetime(&(local + Duration::minutes(minutes)))
                        .earliest()
                })
                .map(|dt| dt.with_timezone(&Utc)),
            DstPolicy::WallClock => {
                let before = tz
                    .from_local_datetime(&(local - Duration::minutes(GAP_SEARCH_MINUTES)))
                    .earliest()?;
                let offset = before.offset().fix().local_minus_utc();
                Some((local - Duration::seconds(offset.into())).and_utc())
            }
        },
    }
}
