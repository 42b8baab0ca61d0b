//! # roombook-engine
//!
//! Recurrence expansion and collision detection for room reservations.
//!
//! A reservation may repeat daily, weekly, every two or three weeks, or on
//! the same ordinal weekday each month, with individual days excluded. The
//! engine expands such reservations into concrete day windows, answers
//! whether one claims part of a query window without expanding it in full,
//! and finds every overlap between a candidate booking and the existing
//! bookings of its room. It is pure computation over value types: storage,
//! permissions and notifications belong to the caller.
//!
//! ## Modules
//!
//! - [`frequency`] — the closed set of repeat patterns
//! - [`period`] — local start/end windows, interval and day-window overlap
//! - [`exclusion`] — excluded calendar days
//! - [`reservation`] — reservations, rooms and derived properties
//! - [`occurrence`] — next occurrence and bounded expansion
//! - [`overlap`] — analytic "does it occupy this window" test
//! - [`collision`] — pairwise collision detection
//! - [`draft`] / [`validation`] — form-like input and integrity checks
//! - [`lookup`] — room and reservation collaborators, booking workflow
//! - [`usage`] — booked hours and the heavy-booking rule
//! - [`zone`] / [`dst`] — conversion of occurrences to UTC
//! - [`ical`] — RRULE/EXDATE export
//! - [`config`] — engine settings
//! - [`error`] — error types

pub mod collision;
pub mod config;
pub mod draft;
pub mod dst;
pub mod error;
pub mod exclusion;
pub mod frequency;
pub mod ical;
pub mod lookup;
pub mod occurrence;
pub mod overlap;
pub mod period;
pub mod reservation;
pub mod usage;
pub mod validation;
pub mod zone;

pub use collision::{find_collisions, Collision, CollisionMode, CollisionReport};
pub use config::EngineSettings;
pub use draft::ReservationDraft;
pub use dst::DstPolicy;
pub use error::EngineError;
pub use exclusion::ExclusionSet;
pub use frequency::RepeatFrequency;
pub use lookup::{check_booking, ReservationSource, RoomDirectory};
pub use occurrence::{find_soonest, next_occurrence, occurrences, occurrences_within};
pub use overlap::overlaps_on;
pub use period::Period;
pub use reservation::{Reservation, ReservationId, Room, RoomId};
pub use validation::{validate, validate_value, ValidationError};
