//! Does a reservation claim any part of a query window?
//!
//! Answered analytically over the dates the two day-windows share, so a
//! booking repeating for years is never expanded in full.

use chrono::{Datelike, NaiveDate};

use crate::frequency::RepeatFrequency;
use crate::period::{iter_days, week_of_month, Period};
use crate::reservation::Reservation;

/// Whether any occurrence of `reservation` overlaps the day-window `window`.
///
/// Equivalent to expanding the reservation up to `window.end` and testing each
/// occurrence with [`Period::day_window_overlaps`], but only the dates shared
/// by the reservation and the window are visited.
pub fn overlaps_on(reservation: &Reservation, window: &Period) -> bool {
    let Some((first, last)) = reservation.bounding_period().shared_dates(window) else {
        return false;
    };

    let start = reservation.start_date();
    let step = match reservation.frequency {
        RepeatFrequency::None => return true,
        RepeatFrequency::Daily => 1,
        RepeatFrequency::Weekly => 7,
        RepeatFrequency::EveryTwoWeeks => 14,
        RepeatFrequency::EveryThreeWeeks => 21,
        RepeatFrequency::Monthly => {
            let ordinal = week_of_month(start);
            return claimed_days(reservation, window, first, last)
                .any(|day| day.weekday() == start.weekday() && week_of_month(day) == ordinal);
        }
    };
    claimed_days(reservation, window, first, last).any(|day| (day - start).num_days() % step == 0)
}

/// Dates in `first..=last` whose slot is not excluded and meets `window`.
fn claimed_days<'a>(
    reservation: &'a Reservation,
    window: &'a Period,
    first: NaiveDate,
    last: NaiveDate,
) -> impl Iterator<Item = NaiveDate> + 'a {
    let (start_time, end_time) = (reservation.start_time(), reservation.end_time());
    iter_days(first, last).filter(move |day| {
        !reservation.is_excluded(*day)
            && Period::on_date(*day, start_time, end_time).day_window_overlaps(window)
    })
}
