//! Tests for reservation validation and the booking-check workflow.

use chrono::{NaiveDate, NaiveDateTime};
use roombook_engine::{
    check_booking, validate, validate_value, Period, RepeatFrequency, Reservation,
    ReservationDraft, ReservationId, Room, RoomId, ValidationError,
};
use serde_json::json;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn rooms() -> Vec<Room> {
    vec![Room::new(RoomId(7), "Council chamber"), Room::new(RoomId(8), "Library")]
}

fn weekly_booking() -> Reservation {
    Reservation::new(RoomId(7), dt(2024, 3, 4, 10, 0), dt(2024, 4, 29, 11, 0))
        .with_frequency(RepeatFrequency::Weekly)
        .with_booked_for("Seminar series")
        .with_reason("Weekly seminar")
}

fn stored() -> Vec<Reservation> {
    vec![
        Reservation::new(RoomId(7), dt(2024, 3, 18, 10, 30), dt(2024, 3, 18, 12, 0))
            .with_id(ReservationId(100))
            .with_booked_for("Visitor")
            .with_reason("Talk"),
        Reservation::new(RoomId(7), dt(2024, 3, 25, 9, 0), dt(2024, 3, 25, 10, 0))
            .with_id(ReservationId(101)),
    ]
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn complete_reservation_without_conflicts_is_valid() {
    let draft = ReservationDraft::from(&weekly_booking());
    let errors = validate(&draft, &rooms(), &[], false);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn adjacent_stored_booking_is_not_a_collision() {
    let draft = ReservationDraft::from(&weekly_booking());
    let errors = validate(&draft, &rooms(), &stored()[1..], false);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

// ---------------------------------------------------------------------------
// Individual checks
// ---------------------------------------------------------------------------

#[test]
fn every_missing_field_is_reported() {
    let draft = ReservationDraft {
        room: Some(RoomId(7)),
        start: Some(dt(2024, 3, 4, 10, 0)),
        ..ReservationDraft::default()
    };

    let errors = validate(&draft, &rooms(), &[], false);

    let missing: Vec<&str> = errors
        .iter()
        .filter_map(|e| match e {
            ValidationError::MissingField { field } => Some(*field),
            _ => None,
        })
        .collect();
    assert_eq!(
        missing,
        vec!["end", "confirmed", "rejected", "cancelled", "booked_for", "reason"]
    );
    assert_eq!(errors.len(), missing.len());
}

#[test]
fn single_day_cannot_repeat() {
    let resv = Reservation::new(RoomId(7), dt(2024, 3, 4, 10, 0), dt(2024, 3, 4, 11, 0))
        .with_frequency(RepeatFrequency::Daily)
        .with_booked_for("x")
        .with_reason("y");

    let errors = validate(&ReservationDraft::from(&resv), &rooms(), &[], false);

    assert_eq!(
        errors,
        vec![ValidationError::RepeatingSingleDay {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            frequency: RepeatFrequency::Daily,
        }]
    );
}

#[test]
fn inverted_dates_and_times_are_both_reported() {
    let resv = Reservation::new(RoomId(7), dt(2024, 3, 4, 11, 0), dt(2024, 3, 4, 10, 0))
        .with_booked_for("x")
        .with_reason("y");

    let errors = validate(&ReservationDraft::from(&resv), &rooms(), &stored(), false);

    assert_eq!(
        errors,
        vec![
            ValidationError::DateOrder {
                start: dt(2024, 3, 4, 11, 0),
                end: dt(2024, 3, 4, 10, 0),
            },
            ValidationError::TimeOrder {
                start: dt(2024, 3, 4, 11, 0).time(),
                end: dt(2024, 3, 4, 10, 0).time(),
            },
        ]
    );
}

#[test]
fn repeating_needs_ordered_times_even_across_dates() {
    let resv = Reservation::new(RoomId(7), dt(2024, 3, 4, 15, 0), dt(2024, 4, 29, 9, 0))
        .with_frequency(RepeatFrequency::Weekly)
        .with_booked_for("x")
        .with_reason("y");

    let errors = validate(&ReservationDraft::from(&resv), &rooms(), &[], false);

    assert!(matches!(errors.as_slice(), [ValidationError::TimeOrder { .. }]));
}

#[test]
fn multi_day_single_booking_may_end_earlier_in_the_day() {
    let resv = Reservation::new(RoomId(7), dt(2024, 3, 4, 15, 0), dt(2024, 3, 6, 9, 0))
        .with_booked_for("Workshop")
        .with_reason("Three-day workshop");
    assert!(validate(&ReservationDraft::from(&resv), &rooms(), &[], false).is_empty());
}

#[test]
fn unknown_room_is_reported() {
    let resv = weekly_booking();
    let draft = ReservationDraft {
        room: Some(RoomId(99)),
        ..ReservationDraft::from(&resv)
    };

    let errors = validate(&draft, &rooms(), &[], false);

    assert_eq!(errors, vec![ValidationError::RoomNotFound { room: RoomId(99) }]);
}

#[test]
fn collisions_carry_window_and_identity() {
    let errors = validate(&ReservationDraft::from(&weekly_booking()), &rooms(), &stored(), false);

    assert_eq!(
        errors,
        vec![ValidationError::Collision {
            period: Period::new(dt(2024, 3, 18, 10, 30), dt(2024, 3, 18, 11, 0)).unwrap(),
            with: Some(ReservationId(100)),
        }]
    );
}

#[test]
fn skip_collision_disables_the_check() {
    let errors = validate(&ReservationDraft::from(&weekly_booking()), &rooms(), &stored(), true);
    assert!(errors.is_empty());
}

#[test]
fn cancelled_and_rejected_drafts_skip_the_collision_check() {
    let cancelled = weekly_booking().with_cancelled(true);
    let rejected = weekly_booking().with_rejected(true);

    assert!(validate(&ReservationDraft::from(&cancelled), &rooms(), &stored(), false).is_empty());
    assert!(validate(&ReservationDraft::from(&rejected), &rooms(), &stored(), false).is_empty());
}

#[test]
fn broken_timing_skips_the_collision_check() {
    let resv = Reservation::new(RoomId(7), dt(2024, 3, 18, 12, 0), dt(2024, 3, 18, 10, 0))
        .with_booked_for("x")
        .with_reason("y");
    let errors = validate(&ReservationDraft::from(&resv), &rooms(), &stored(), false);
    assert!(!errors
        .iter()
        .any(|e| matches!(e, ValidationError::Collision { .. })));
}

#[test]
fn validation_is_idempotent() {
    let draft = ReservationDraft::from(&weekly_booking());
    let others = stored();
    let first = validate(&draft, &rooms(), &others, false);
    let second = validate(&draft, &rooms(), &others, false);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

// ---------------------------------------------------------------------------
// JSON input
// ---------------------------------------------------------------------------

#[test]
fn validate_value_reports_each_field_once() {
    let errors = validate_value(
        &json!({
            "room": "seven",
            "start": "2024-03-04T10:00:00",
            "end": "2024-04-29T11:00:00",
            "frequency": "weekly",
            "confirmed": true,
            "rejected": false,
            "cancelled": false,
            "booked_for": "Seminar series",
        }),
        &rooms(),
        &stored(),
        false,
    );

    assert_eq!(
        errors,
        vec![
            ValidationError::TypeMismatch {
                field: "room",
                expected: "a room number",
            },
            ValidationError::MissingField { field: "reason" },
        ]
    );
}

#[test]
fn error_messages_are_readable() {
    let errors = validate_value(&json!({}), &rooms(), &[], false);
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(messages[0], "missing required field: room");

    let json = serde_json::to_value(&errors[0]).unwrap();
    assert_eq!(json, json!({ "kind": "missing_field", "field": "room" }));
}

// ---------------------------------------------------------------------------
// Booking workflow
// ---------------------------------------------------------------------------

#[test]
fn check_booking_fetches_nearby_and_validates() {
    let mut store = stored();
    store.push(
        Reservation::new(RoomId(8), dt(2024, 3, 4, 10, 0), dt(2024, 3, 4, 11, 0)).with_id(ReservationId(200)),
    );

    let errors = check_booking(&ReservationDraft::from(&weekly_booking()), &rooms(), &store, false);

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        ValidationError::Collision {
            with: Some(ReservationId(100)),
            ..
        }
    ));
}

#[test]
fn check_booking_excludes_the_stored_version_of_an_edit() {
    let store = vec![weekly_booking().with_id(ReservationId(5))];
    let edited = weekly_booking().with_id(ReservationId(5));

    let errors = check_booking(&ReservationDraft::from(&edited), &rooms(), &store, false);

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}
