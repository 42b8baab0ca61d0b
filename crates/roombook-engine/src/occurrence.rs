//! Occurrence generation -- turns a reservation's repetition pattern into the
//! concrete day windows it claims.
//!
//! Only calendar dates take part in the arithmetic. Every occurrence keeps the
//! time of day of the reservation's `start` and `end`. Excluded days are skipped
//! transparently and never appear in the output.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use tracing::trace;

use crate::frequency::RepeatFrequency;
use crate::period::{week_of_month, Period};
use crate::reservation::Reservation;

/// The first occurrence on a date strictly after `after`'s date.
///
/// `after` is treated as the end of its day, so an occurrence later on the
/// same day is never returned. Returns `None` once `after` reaches the
/// reservation's last permissible date or when no further date fits the
/// pattern.
///
/// A non-repeating reservation yields its single window iff `after`'s date is
/// before the start date.
pub fn next_occurrence(reservation: &Reservation, after: NaiveDateTime) -> Option<Period> {
    let mut after = after.date();
    if after >= reservation.end_date() {
        return None;
    }

    if !reservation.is_repeating() {
        return (after < reservation.start_date()).then(|| reservation.bounding_period());
    }

    // Each pass moves strictly forward and stops at the end date.
    loop {
        let date = candidate_after(reservation, after)?;
        if date > reservation.end_date() {
            return None;
        }
        if !reservation.exclusions.contains(date) {
            return Some(Period::on_date(
                date,
                reservation.start_time(),
                reservation.end_time(),
            ));
        }
        trace!(%date, "skipping excluded day");
        after = date;
    }
}

/// Smallest date after `after` (and not before the start date) that matches
/// the pattern, ignoring exclusions and the end date.
fn candidate_after(reservation: &Reservation, after: NaiveDate) -> Option<NaiveDate> {
    let start = reservation.start_date();
    let first = after.succ_opt()?.max(start);

    match reservation.frequency {
        RepeatFrequency::None => (first == start).then_some(first),
        RepeatFrequency::Daily
        | RepeatFrequency::Weekly
        | RepeatFrequency::EveryTwoWeeks
        | RepeatFrequency::EveryThreeWeeks => {
            let step = reservation.frequency.interval_days()?;
            let offset = (first - start).num_days();
            let behind = (step - offset % step) % step;
            first.checked_add_days(Days::new(behind.unsigned_abs()))
        }
        RepeatFrequency::Monthly => monthly_candidate(reservation, first),
    }
}

fn monthly_candidate(reservation: &Reservation, first: NaiveDate) -> Option<NaiveDate> {
    let weekday = reservation.start.weekday().num_days_from_monday();
    let ordinal = week_of_month(reservation.start_date());

    let ahead = (7 + weekday - first.weekday().num_days_from_monday()) % 7;
    let mut candidate = first.checked_add_days(Days::new(ahead.into()))?;
    while week_of_month(candidate) != ordinal {
        if candidate > reservation.end_date() {
            return None;
        }
        candidate = candidate.checked_add_days(Days::new(7))?;
    }
    Some(candidate)
}

/// All occurrences of `reservation`, in ascending order.
///
/// With `until`, enumeration stops at the first occurrence starting on a later
/// date. The sequence is always finite because the reservation's end date
/// bounds it.
pub fn occurrences(reservation: &Reservation, until: Option<NaiveDate>) -> Vec<Period> {
    let mut periods = Vec::new();
    let Some(mut last) = reservation.start.checked_sub_days(Days::new(1)) else {
        return periods;
    };

    while let Some(period) = next_occurrence(reservation, last) {
        if until.is_some_and(|until| period.start.date() > until) {
            break;
        }
        last = period.start;
        periods.push(period);
    }

    periods
}

/// Occurrences lying entirely inside `window`.
pub fn occurrences_within(reservation: &Reservation, window: &Period) -> Vec<Period> {
    let mut periods = Vec::new();
    let from = window.start.max(reservation.start);
    let Some(mut last) = from.checked_sub_days(Days::new(1)) else {
        return periods;
    };

    while let Some(period) = next_occurrence(reservation, last) {
        if period.start.date() > window.end.date() {
            break;
        }
        last = period.start;
        if period.start >= window.start && period.end <= window.end {
            periods.push(period);
        }
    }

    periods
}

/// The reservation whose next occurrence after `after` comes first.
///
/// Reservations without a further occurrence are ignored; on a tie the
/// earlier entry wins.
pub fn find_soonest(reservations: &[Reservation], after: NaiveDateTime) -> Option<&Reservation> {
    reservations
        .iter()
        .filter_map(|resv| next_occurrence(resv, after).map(|period| (period.start, resv)))
        .min_by_key(|(start, _)| *start)
        .map(|(_, resv)| resv)
}
