//! Rooms, reservations and the properties derived from them.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::exclusion::ExclusionSet;
use crate::frequency::RepeatFrequency;
use crate::period::{week_of_month, Period};

/// Identifier of a stored reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub u64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a bookable room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable room, as far as the engine needs to know it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// Anyone may book the room.
    #[serde(default = "default_true")]
    pub reservable: bool,
    /// Booking is restricted to an access list.
    #[serde(default)]
    pub has_booking_acl: bool,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            reservable: true,
            has_booking_acl: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A room reservation, possibly repeating.
///
/// `start` and `end` describe the first occurrence's window. For a repeating
/// reservation `end.date()` is the last date an occurrence may fall on and
/// `end.time()` is the end time of every occurrence.
///
/// A reservation that starts and ends on the same date cannot repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default)]
    pub id: Option<ReservationId>,
    pub room: RoomId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub frequency: RepeatFrequency,
    #[serde(default)]
    pub exclusions: ExclusionSet,
    #[serde(default = "default_true")]
    pub confirmed: bool,
    #[serde(default)]
    pub rejected: bool,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub booked_for: String,
    #[serde(default)]
    pub reason: String,
}

impl Reservation {
    /// A confirmed, non-repeating reservation of `room` from `start` to `end`.
    pub fn new(room: RoomId, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: None,
            room,
            start,
            end,
            frequency: RepeatFrequency::None,
            exclusions: ExclusionSet::new(),
            confirmed: true,
            rejected: false,
            cancelled: false,
            booked_for: String::new(),
            reason: String::new(),
        }
    }

    pub fn with_id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_frequency(mut self, frequency: RepeatFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// A copy with `date` added to the excluded days.
    pub fn excluding(mut self, date: NaiveDate) -> Self {
        self.exclusions.exclude(date);
        self
    }

    pub fn with_confirmed(mut self, confirmed: bool) -> Self {
        self.confirmed = confirmed;
        self
    }

    pub fn with_rejected(mut self, rejected: bool) -> Self {
        self.rejected = rejected;
        self
    }

    pub fn with_cancelled(mut self, cancelled: bool) -> Self {
        self.cancelled = cancelled;
        self
    }

    pub fn with_booked_for(mut self, booked_for: impl Into<String>) -> Self {
        self.booked_for = booked_for.into();
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start.time()
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end.time()
    }

    /// The whole `[start, end]` span, repetitions included.
    pub fn bounding_period(&self) -> Period {
        Period {
            start: self.start,
            end: self.end,
        }
    }

    pub fn is_repeating(&self) -> bool {
        self.frequency.is_repeating()
    }

    /// Weekday every occurrence falls on, for weekday-bound patterns.
    pub fn weekday(&self) -> Option<Weekday> {
        self.frequency
            .is_weekday_bound()
            .then(|| self.start.weekday())
    }

    /// For monthly reservations, which occurrence of [`Self::weekday`] within
    /// the month (1..=5) the reservation takes place on.
    pub fn week_of_month(&self) -> Option<u32> {
        (self.frequency == RepeatFrequency::Monthly).then(|| week_of_month(self.start.date()))
    }

    /// Whether `date` is an excluded day. Always `false` for non-repeating
    /// reservations.
    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.is_repeating() && self.exclusions.contains(date)
    }

    /// Neither cancelled nor rejected; such reservations block their room.
    pub fn is_active(&self) -> bool {
        !self.cancelled && !self.rejected
    }

    /// Active and confirmed.
    pub fn is_valid(&self) -> bool {
        self.confirmed && self.is_active()
    }

    /// The reservation has ended before `now`.
    pub fn is_archival(&self, now: NaiveDateTime) -> bool {
        self.end < now
    }

    /// E.g. "Once a week on Monday".
    pub fn verbose_repetition(&self) -> String {
        match self.weekday() {
            Some(weekday) => format!("{} on {}", self.frequency, weekday_name(weekday)),
            None => self.frequency.to_string(),
        }
    }

    /// E.g. "Valid, Live" or "Cancelled, Rejected, Archival".
    pub fn verbose_status(&self, now: NaiveDateTime) -> String {
        let mut parts = Vec::new();
        if self.is_valid() {
            parts.push("Valid");
        } else {
            if self.cancelled {
                parts.push("Cancelled");
            }
            if self.rejected {
                parts.push("Rejected");
            }
            if !self.confirmed {
                parts.push("Not confirmed");
            }
        }
        parts.push(if self.is_archival(now) { "Archival" } else { "Live" });
        parts.join(", ")
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
