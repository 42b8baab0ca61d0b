//! Detect overlapping occurrences between a candidate reservation and the
//! existing reservations of the same room.
//!
//! Both sides are expanded into occurrences, each occurrence is cut into
//! windows of at most one calendar day ([`Period::day_windows`]), and the
//! windows are compared pairwise. Windows that merely touch (one ends exactly
//! when the other starts) do not collide.

use serde::Serialize;
use tracing::debug;

use crate::occurrence::occurrences;
use crate::period::Period;
use crate::reservation::Reservation;

/// An overlap between the candidate and one existing reservation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collision<'a> {
    /// The overlapping part of the two occurrences.
    pub period: Period,
    /// The existing reservation the candidate collides with.
    pub with: &'a Reservation,
}

/// Whether to collect every collision or stop at the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionMode {
    #[default]
    CollectAll,
    FirstOnly,
}

/// Result of [`find_collisions`], shaped by the requested [`CollisionMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionReport<'a> {
    Collisions(Vec<Collision<'a>>),
    Found(bool),
}

impl<'a> CollisionReport<'a> {
    pub fn collides(&self) -> bool {
        match self {
            CollisionReport::Collisions(collisions) => !collisions.is_empty(),
            CollisionReport::Found(found) => *found,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.collides()
    }

    /// The collected collisions; empty for a `FirstOnly` report.
    pub fn into_collisions(self) -> Vec<Collision<'a>> {
        match self {
            CollisionReport::Collisions(collisions) => collisions,
            CollisionReport::Found(_) => Vec::new(),
        }
    }
}

/// Find occurrences of `others` that overlap occurrences of `candidate`.
///
/// Cancelled or rejected reservations are ignored, as is any reservation
/// sharing the candidate's id (the stored version of a booking being edited).
/// `others` may be a superset of the relevant reservations: those whose dates
/// cannot meet the candidate's are dropped before expansion.
///
/// Expansion of every reservation stops at the candidate's end date; nothing
/// later can overlap it.
pub fn find_collisions<'a>(
    candidate: &Reservation,
    others: &'a [Reservation],
    mode: CollisionMode,
) -> CollisionReport<'a> {
    let horizon = candidate.end_date();
    let candidate_windows = day_windows(candidate, horizon);
    let mut collisions = Vec::new();
    let mut checked = 0usize;

    for other in others.iter().filter(|other| is_relevant(candidate, other)) {
        checked += 1;
        let other_windows = day_windows(other, horizon);

        for candidate_window in &candidate_windows {
            for other_window in &other_windows {
                let Some(period) = candidate_window.intersection(other_window) else {
                    continue;
                };
                if mode == CollisionMode::FirstOnly {
                    debug!(with = ?other.id, start = %period.start, "collision found");
                    return CollisionReport::Found(true);
                }
                collisions.push(Collision {
                    period,
                    with: other,
                });
            }
        }
    }

    debug!(
        candidate_windows = candidate_windows.len(),
        supplied = others.len(),
        checked,
        collisions = collisions.len(),
        "collision check finished"
    );

    match mode {
        CollisionMode::CollectAll => CollisionReport::Collisions(collisions),
        CollisionMode::FirstOnly => CollisionReport::Found(false),
    }
}

fn day_windows(reservation: &Reservation, horizon: chrono::NaiveDate) -> Vec<Period> {
    occurrences(reservation, Some(horizon))
        .iter()
        .flat_map(Period::day_windows)
        .filter(|window| window.start.date() <= horizon)
        .collect()
}

fn is_relevant(candidate: &Reservation, other: &Reservation) -> bool {
    if !other.is_active() {
        return false;
    }
    if candidate.id.is_some() && other.id == candidate.id {
        return false;
    }
    other.start_date() <= candidate.end_date() && candidate.start_date() <= other.end_date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::{ReservationId, RoomId};
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn own_stored_version_is_ignored() {
        let stored = Reservation::new(RoomId(1), dt(2024, 3, 4, 10, 0), dt(2024, 3, 4, 11, 0))
            .with_id(ReservationId(42));
        let edited = stored.clone();

        let report = find_collisions(&edited, std::slice::from_ref(&stored), CollisionMode::CollectAll);
        assert!(report.is_empty());
    }

    #[test]
    fn new_bookings_without_id_are_not_identity_excluded() {
        let a = Reservation::new(RoomId(1), dt(2024, 3, 4, 10, 0), dt(2024, 3, 4, 11, 0));
        let b = a.clone();

        let report = find_collisions(&a, std::slice::from_ref(&b), CollisionMode::FirstOnly);
        assert_eq!(report, CollisionReport::Found(true));
    }

    #[test]
    fn disjoint_date_ranges_are_not_relevant() {
        let a = Reservation::new(RoomId(1), dt(2024, 3, 4, 10, 0), dt(2024, 3, 4, 11, 0));
        let b = Reservation::new(RoomId(1), dt(2024, 3, 5, 10, 0), dt(2024, 3, 5, 11, 0));
        assert!(!is_relevant(&a, &b));
    }
}
