//! How much of a room a reservation takes up.

use crate::config::EngineSettings;
use crate::occurrence::occurrences;
use crate::reservation::{Reservation, Room};

/// Total booked time over all occurrences, in hours.
pub fn booked_hours(reservation: &Reservation) -> f64 {
    let minutes: i64 = occurrences(reservation, None)
        .iter()
        .map(|period| period.duration().num_minutes())
        .sum();
    minutes as f64 / 60.0
}

/// A heavy booking monopolises a publicly bookable room and has to be
/// re-confirmed periodically.
///
/// Heavy means: the room is reservable by anyone and has no booking access
/// list, the booking repeats, spans at least `heavy_min_days` days, and books
/// at least `heavy_hours_per_month` hours per 30 days.
pub fn is_heavy(reservation: &Reservation, room: &Room, settings: &EngineSettings) -> bool {
    if !room.reservable || room.has_booking_acl || !reservation.is_repeating() {
        return false;
    }

    let span_days = (reservation.end - reservation.start).num_days();
    if span_days < settings.heavy_min_days || span_days <= 0 {
        return false;
    }

    let hours_per_month = booked_hours(reservation) / span_days as f64 * 30.0;
    hours_per_month >= settings.heavy_hours_per_month
}
