//! Collaborators the engine consumes but does not implement: room lookup and
//! the storage-side search for reservations that might collide.
//!
//! In-memory implementations over slices are provided for tests and tools.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use tracing::debug;

use crate::draft::ReservationDraft;
use crate::reservation::{Reservation, ReservationId, Room, RoomId};
use crate::validation::{validate, ValidationError};

/// Room existence check used by validation.
pub trait RoomDirectory {
    fn lookup_room(&self, id: RoomId) -> Option<Room>;
}

/// Coarse pre-filter over stored reservations.
///
/// Implementations may return a superset of the reservations that can
/// actually collide; the engine narrows the list itself.
pub trait ReservationSource {
    /// Reservations of `room` whose date span meets `dates`, except the one
    /// with id `exclude`.
    fn find_nearby_reservations(
        &self,
        room: RoomId,
        dates: RangeInclusive<NaiveDate>,
        exclude: Option<ReservationId>,
    ) -> Vec<Reservation>;
}

impl RoomDirectory for [Room] {
    fn lookup_room(&self, id: RoomId) -> Option<Room> {
        self.iter().find(|room| room.id == id).cloned()
    }
}

impl RoomDirectory for Vec<Room> {
    fn lookup_room(&self, id: RoomId) -> Option<Room> {
        self.as_slice().lookup_room(id)
    }
}

impl RoomDirectory for HashMap<RoomId, Room> {
    fn lookup_room(&self, id: RoomId) -> Option<Room> {
        self.get(&id).cloned()
    }
}

impl ReservationSource for [Reservation] {
    fn find_nearby_reservations(
        &self,
        room: RoomId,
        dates: RangeInclusive<NaiveDate>,
        exclude: Option<ReservationId>,
    ) -> Vec<Reservation> {
        self.iter()
            .filter(|resv| resv.room == room)
            .filter(|resv| exclude.is_none() || resv.id != exclude)
            .filter(|resv| resv.start_date() <= *dates.end() && *dates.start() <= resv.end_date())
            .cloned()
            .collect()
    }
}

impl ReservationSource for Vec<Reservation> {
    fn find_nearby_reservations(
        &self,
        room: RoomId,
        dates: RangeInclusive<NaiveDate>,
        exclude: Option<ReservationId>,
    ) -> Vec<Reservation> {
        self.as_slice().find_nearby_reservations(room, dates, exclude)
    }
}

/// The booking-creation check: fetch the reservations near the draft from
/// `source`, then [`validate`] against them.
///
/// When the draft lacks a room or dates there is nothing to search for and
/// validation runs against an empty list.
pub fn check_booking<R, S>(
    draft: &ReservationDraft,
    rooms: &R,
    source: &S,
    skip_collision: bool,
) -> Vec<ValidationError>
where
    R: RoomDirectory + ?Sized,
    S: ReservationSource + ?Sized,
{
    let nearby = match (draft.room, draft.start, draft.end) {
        (Some(room), Some(start), Some(end)) if !skip_collision && start <= end => {
            source.find_nearby_reservations(room, start.date()..=end.date(), draft.id)
        }
        _ => Vec::new(),
    };
    debug!(nearby = nearby.len(), "fetched nearby reservations");

    validate(draft, rooms, &nearby, skip_collision)
}
