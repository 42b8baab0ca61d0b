//! Form-like reservation input, before it is known to be complete.
//!
//! A [`ReservationDraft`] holds whatever the caller supplied. Missing fields
//! stay `None` and are reported by [`crate::validation::validate`]. Fields of the
//! wrong type are reported while decoding JSON with
//! [`ReservationDraft::from_value`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::exclusion::ExclusionSet;
use crate::frequency::RepeatFrequency;
use crate::reservation::{Reservation, ReservationId, RoomId};
use crate::validation::ValidationError;

/// Date-time layouts accepted in JSON input, tried in order.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    #[serde(default)]
    pub id: Option<ReservationId>,
    #[serde(default)]
    pub room: Option<RoomId>,
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub frequency: RepeatFrequency,
    #[serde(default)]
    pub exclusions: ExclusionSet,
    #[serde(default)]
    pub confirmed: Option<bool>,
    #[serde(default)]
    pub rejected: Option<bool>,
    #[serde(default)]
    pub cancelled: Option<bool>,
    #[serde(default)]
    pub booked_for: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ReservationDraft {
    /// Decode a JSON object field by field.
    ///
    /// Absent and `null` fields are left unset. A field of the wrong JSON type,
    /// or a string that does not parse, yields a `TypeMismatch` and is left
    /// unset too. Unknown keys are ignored.
    pub fn from_value(value: &Value) -> (Self, Vec<ValidationError>) {
        let mut draft = Self::default();
        let mut errors = Vec::new();

        let Some(object) = value.as_object() else {
            errors.push(ValidationError::TypeMismatch {
                field: "reservation",
                expected: "an object",
            });
            return (draft, errors);
        };

        let mut fields = Fields {
            object,
            errors: &mut errors,
        };

        draft.id = fields.decode("id", "an unsigned integer", |v| {
            v.as_u64().map(ReservationId)
        });
        draft.room = fields.decode("room", "a room number", |v| {
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(RoomId)
        });
        draft.start = fields.decode("start", "a date-time", |v| v.as_str().and_then(parse_datetime));
        draft.end = fields.decode("end", "a date-time", |v| v.as_str().and_then(parse_datetime));
        draft.frequency = fields
            .decode("frequency", "a repeat frequency", |v| {
                v.as_str().and_then(|s| s.parse().ok())
            })
            .unwrap_or_default();
        draft.exclusions = fields
            .decode("exclusions", "a list of dates", |v| {
                v.as_array()?
                    .iter()
                    .map(|day| day.as_str().and_then(parse_date))
                    .collect::<Option<ExclusionSet>>()
            })
            .unwrap_or_default();
        draft.confirmed = fields.decode("confirmed", "a boolean", Value::as_bool);
        draft.rejected = fields.decode("rejected", "a boolean", Value::as_bool);
        draft.cancelled = fields.decode("cancelled", "a boolean", Value::as_bool);
        draft.booked_for = fields.decode("booked_for", "a string", |v| v.as_str().map(str::to_string));
        draft.reason = fields.decode("reason", "a string", |v| v.as_str().map(str::to_string));

        (draft, errors)
    }

    /// The typed reservation, if room, start and end are all present.
    ///
    /// Unset status flags take their defaults (confirmed, not rejected, not
    /// cancelled). No ordering checks are made here.
    pub fn to_reservation(&self) -> Option<Reservation> {
        Some(Reservation {
            id: self.id,
            room: self.room?,
            start: self.start?,
            end: self.end?,
            frequency: self.frequency,
            exclusions: self.exclusions.clone(),
            confirmed: self.confirmed.unwrap_or(true),
            rejected: self.rejected.unwrap_or(false),
            cancelled: self.cancelled.unwrap_or(false),
            booked_for: self.booked_for.clone().unwrap_or_default(),
            reason: self.reason.clone().unwrap_or_default(),
        })
    }
}

impl From<&Reservation> for ReservationDraft {
    fn from(resv: &Reservation) -> Self {
        Self {
            id: resv.id,
            room: Some(resv.room),
            start: Some(resv.start),
            end: Some(resv.end),
            frequency: resv.frequency,
            exclusions: resv.exclusions.clone(),
            confirmed: Some(resv.confirmed),
            rejected: Some(resv.rejected),
            cancelled: Some(resv.cancelled),
            booked_for: Some(resv.booked_for.clone()),
            reason: Some(resv.reason.clone()),
        }
    }
}

struct Fields<'a> {
    object: &'a Map<String, Value>,
    errors: &'a mut Vec<ValidationError>,
}

impl Fields<'_> {
    fn decode<T>(
        &mut self,
        field: &'static str,
        expected: &'static str,
        parse: impl FnOnce(&Value) -> Option<T>,
    ) -> Option<T> {
        let value = self.object.get(field).filter(|v| !v.is_null())?;
        let parsed = parse(value);
        if parsed.is_none() {
            self.errors
                .push(ValidationError::TypeMismatch { field, expected });
        }
        parsed
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

/// Exclusions are plain dates; a date-time string is rejected.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
