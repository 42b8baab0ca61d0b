//! Reservation integrity checks.
//!
//! Every check runs and appends its own errors, so a form can show all
//! problems at once. An empty result means the reservation may be stored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::collision::{find_collisions, CollisionMode};
use crate::draft::ReservationDraft;
use crate::frequency::RepeatFrequency;
use crate::lookup::RoomDirectory;
use crate::period::Period;
use crate::reservation::{Reservation, ReservationId, RoomId};

/// A problem found while validating a reservation.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("field {field} must be {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("a reservation starting and ending on {date} cannot repeat ({frequency})")]
    RepeatingSingleDay {
        date: NaiveDate,
        frequency: RepeatFrequency,
    },

    #[error("start {start} must be before end {end}")]
    DateOrder {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("start time {start} must be before end time {end}")]
    TimeOrder { start: NaiveTime, end: NaiveTime },

    #[error("room {room} not found")]
    RoomNotFound { room: RoomId },

    #[error("collides with {} during {period}", describe(.with))]
    Collision {
        period: Period,
        with: Option<ReservationId>,
    },
}

fn describe(with: &Option<ReservationId>) -> String {
    match with {
        Some(id) => format!("reservation {id}"),
        None => "an unsaved reservation".to_string(),
    }
}

/// Validate `draft` against the known rooms and the existing reservations of
/// its room.
///
/// Checks, in order: required fields, no repetition within a single day,
/// start before end (and start time before end time whenever occurrences use
/// both), room existence, and finally collisions. Collisions are only looked
/// for when the timing is sound, the reservation is neither cancelled nor
/// rejected, and `skip_collision` is false.
pub fn validate<R>(
    draft: &ReservationDraft,
    rooms: &R,
    others: &[Reservation],
    skip_collision: bool,
) -> Vec<ValidationError>
where
    R: RoomDirectory + ?Sized,
{
    let mut errors = missing_fields(draft);
    let mut timing_ok = draft.start.is_some() && draft.end.is_some();

    if let (Some(start), Some(end)) = (draft.start, draft.end) {
        let single_day = start.date() == end.date();
        if single_day && draft.frequency.is_repeating() {
            errors.push(ValidationError::RepeatingSingleDay {
                date: start.date(),
                frequency: draft.frequency,
            });
            timing_ok = false;
        }
        if start >= end {
            errors.push(ValidationError::DateOrder { start, end });
            timing_ok = false;
        }
        if (single_day || draft.frequency.is_repeating()) && start.time() >= end.time() {
            errors.push(ValidationError::TimeOrder {
                start: start.time(),
                end: end.time(),
            });
            timing_ok = false;
        }
    }

    if let Some(room) = draft.room {
        if rooms.lookup_room(room).is_none() {
            errors.push(ValidationError::RoomNotFound { room });
        }
    }

    if timing_ok && !skip_collision {
        if let Some(candidate) = draft.to_reservation().filter(Reservation::is_active) {
            let report = find_collisions(&candidate, others, CollisionMode::CollectAll);
            errors.extend(report.into_collisions().into_iter().map(|collision| {
                ValidationError::Collision {
                    period: collision.period,
                    with: collision.with.id,
                }
            }));
        }
    }

    debug!(
        id = ?draft.id,
        room = ?draft.room,
        errors = errors.len(),
        "reservation validated"
    );
    errors
}

/// Decode a form-like JSON object and validate it.
///
/// Each field is reported at most once: a field with the wrong type is not
/// also reported as missing.
pub fn validate_value<R>(
    value: &Value,
    rooms: &R,
    others: &[Reservation],
    skip_collision: bool,
) -> Vec<ValidationError>
where
    R: RoomDirectory + ?Sized,
{
    let (draft, mut errors) = ReservationDraft::from_value(value);
    let mismatched: Vec<&'static str> = errors
        .iter()
        .filter_map(|error| match error {
            ValidationError::TypeMismatch { field, .. } => Some(*field),
            _ => None,
        })
        .collect();

    errors.extend(
        validate(&draft, rooms, others, skip_collision)
            .into_iter()
            .filter(|error| {
                !matches!(error, ValidationError::MissingField { field } if mismatched.contains(field))
            }),
    );
    errors
}

fn missing_fields(draft: &ReservationDraft) -> Vec<ValidationError> {
    let required = [
        ("room", draft.room.is_some()),
        ("start", draft.start.is_some()),
        ("end", draft.end.is_some()),
        ("confirmed", draft.confirmed.is_some()),
        ("rejected", draft.rejected.is_some()),
        ("cancelled", draft.cancelled.is_some()),
        ("booked_for", draft.booked_for.is_some()),
        ("reason", draft.reason.is_some()),
    ];

    required
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| ValidationError::MissingField { field })
        .collect()
}
