//! iCalendar export of a reservation's repetition.
//!
//! Each repeat pattern maps onto an RFC 5545 RRULE, and excluded days onto
//! EXDATE entries, so a reservation can be published in a calendar feed.
//! [`expand_with_rrule`] feeds the exported text through the `rrule` crate,
//! which gives an independent expansion to check the engine against.

use chrono::{DateTime, Utc};
use rrule::RRuleSet;

use crate::dst::DstPolicy;
use crate::error::{EngineError, Result};
use crate::frequency::RepeatFrequency;
use crate::reservation::Reservation;
use crate::zone::{local_to_utc, parse_timezone, to_utc};

const ICAL_FORMAT: &str = "%Y%m%dT%H%M%S";
const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// The RRULE value (without the `RRULE:` prefix) for a repeating
/// reservation, with a floating-time UNTIL. `None` when it does not repeat.
pub fn recurrence_rule(reservation: &Reservation) -> Option<String> {
    let until = reservation.end_date().and_time(reservation.start_time());
    Some(format!("{};UNTIL={}", frequency_part(reservation)?, until.format(ICAL_FORMAT)))
}

/// DTSTART, RRULE and EXDATE lines for `reservation` in `timezone`.
///
/// UNTIL is written as the UTC instant of the last start, which RFC 5545
/// requires once DTSTART carries a TZID.
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` if `timezone` is not a valid IANA
/// identifier, and `EngineError::InvalidRule` if the last start has no UTC
/// instant.
pub fn to_ical(reservation: &Reservation, timezone: &str) -> Result<String> {
    let tz = parse_timezone(timezone)?;

    let mut text = format!(
        "DTSTART;TZID={}:{}",
        timezone,
        reservation.start.format(ICAL_FORMAT)
    );

    if let Some(freq) = frequency_part(reservation) {
        let until_local = reservation.end_date().and_time(reservation.start_time());
        let until = local_to_utc(until_local, tz, DstPolicy::WallClock).ok_or_else(|| {
            EngineError::InvalidRule(format!("no UTC instant for UNTIL {}", until_local))
        })?;
        text.push_str(&format!("\nRRULE:{};UNTIL={}", freq, until.format(UTC_FORMAT)));

        if !reservation.exclusions.is_empty() {
            let exdates: Vec<String> = reservation
                .exclusions
                .iter()
                .map(|day| day.and_time(reservation.start_time()).format(ICAL_FORMAT).to_string())
                .collect();
            text.push_str(&format!("\nEXDATE;TZID={}:{}", timezone, exdates.join(",")));
        }
    }

    Ok(text)
}

/// Occurrence starts of `reservation` as computed by the `rrule` crate from
/// the exported iCalendar text.
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` for an unknown timezone and
/// `EngineError::InvalidRule` if the `rrule` crate rejects the text.
pub fn expand_with_rrule(reservation: &Reservation, timezone: &str) -> Result<Vec<DateTime<Utc>>> {
    if !reservation.is_repeating() {
        let tz = parse_timezone(timezone)?;
        return Ok(to_utc(&reservation.bounding_period(), tz, DstPolicy::WallClock)
            .map(|period| period.start)
            .into_iter()
            .collect());
    }

    let text = to_ical(reservation, timezone)?;
    let rrule_set: RRuleSet = text
        .parse()
        .map_err(|e| EngineError::InvalidRule(format!("{}", e)))?;

    Ok(rrule_set
        .all(u16::MAX)
        .dates
        .into_iter()
        .map(|dt| dt.with_timezone(&Utc))
        .collect())
}

fn frequency_part(reservation: &Reservation) -> Option<String> {
    Some(match reservation.frequency {
        RepeatFrequency::None => return None,
        RepeatFrequency::Daily => "FREQ=DAILY".to_string(),
        RepeatFrequency::Weekly => "FREQ=WEEKLY".to_string(),
        RepeatFrequency::EveryTwoWeeks => "FREQ=WEEKLY;INTERVAL=2".to_string(),
        RepeatFrequency::EveryThreeWeeks => "FREQ=WEEKLY;INTERVAL=3".to_string(),
        RepeatFrequency::Monthly => format!(
            "FREQ=MONTHLY;BYDAY={}{}",
            reservation.week_of_month()?,
            weekday_code(reservation)?
        ),
    })
}

fn weekday_code(reservation: &Reservation) -> Option<&'static str> {
    use chrono::Weekday;

    Some(match reservation.weekday()? {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    })
}
