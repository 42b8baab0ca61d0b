//! Civil start/end windows and the two ways of comparing them.
//!
//! A [`Period`] is a plain local date-time pair. Occurrences are compared as
//! half-open intervals ([`Period::overlaps`]). A reservation's bounding box and
//! a query window are compared as *day-windows* ([`Period::day_window_overlaps`]):
//! "this time slot on each of these days".

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A local start/end pair with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Period {
    /// # Errors
    /// Returns `EngineError::InvalidPeriod` unless `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start >= end {
            return Err(EngineError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// The window `[start_time, end_time]` on `date`.
    pub(crate) fn on_date(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start: date.and_time(start_time),
            end: date.and_time(end_time),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open interval overlap. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The common part of two overlapping intervals.
    pub fn intersection(&self, other: &Period) -> Option<Period> {
        self.overlaps(other).then(|| Period {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Whether the period reads as the slot `start.time()..end.time()` on each
    /// of its dates. A multi-day period ending earlier in the day than it
    /// starts has no such slot and is one continuous span instead.
    pub fn has_daily_slot(&self) -> bool {
        self.start.date() == self.end.date() || self.start.time() < self.end.time()
    }

    /// The period cut into windows of at most one calendar day.
    ///
    /// A period with a daily slot yields that slot on every date. A continuous
    /// span is cut at midnight.
    pub fn day_windows(&self) -> Vec<Period> {
        if self.has_daily_slot() {
            return self.slots_between(self.start.date(), self.end.date()).collect();
        }

        iter_days(self.start.date(), self.end.date())
            .filter_map(|day| {
                let start = self.start.max(day.and_time(NaiveTime::MIN));
                let end = day
                    .succ_opt()
                    .map_or(self.end, |next| self.end.min(next.and_time(NaiveTime::MIN)));
                (start < end).then_some(Period { start, end })
            })
            .collect()
    }

    /// Daily slots of a slotted period on the dates in `first..=last`.
    fn slots_between(&self, first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = Period> {
        let (start_time, end_time) = (self.start.time(), self.end.time());
        iter_days(first.max(self.start.date()), last.min(self.end.date()))
            .map(move |day| Period::on_date(day, start_time, end_time))
    }

    /// Day-window overlap: some window of one period overlaps some window of
    /// the other, windows being as in [`Period::day_windows`].
    ///
    /// For two slotted periods this is: the inclusive date ranges intersect
    /// and the time-of-day slots intersect.
    pub fn day_window_overlaps(&self, other: &Period) -> bool {
        if self.end.date() < other.start.date() || other.end.date() < self.start.date() {
            return false;
        }
        match (self.has_daily_slot(), other.has_daily_slot()) {
            (true, true) => {
                self.end.time() > other.start.time() && other.end.time() > self.start.time()
            }
            (true, false) => self
                .slots_between(other.start.date(), other.end.date())
                .any(|slot| slot.overlaps(other)),
            (false, true) => other.day_window_overlaps(self),
            (false, false) => self.overlaps(other),
        }
    }

    /// The dates shared by two day-windows, if they overlap.
    pub fn shared_dates(&self, other: &Period) -> Option<(NaiveDate, NaiveDate)> {
        self.day_window_overlaps(other).then(|| {
            (
                self.start.date().max(other.start.date()),
                self.end.date().min(other.end.date()),
            )
        })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Which occurrence of its weekday `date` is within its month: 1 for the
/// first Monday, 5 for a fifth Monday.
pub fn week_of_month(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

/// Every date from `first` to `last`, inclusive.
pub fn iter_days(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |day| *day <= last)
}
