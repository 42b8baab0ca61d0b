//! `roombook` CLI: expand, check and export room reservations from JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Occurrences of a reservation (stdin → stdout)
//! echo '{"room":7,"start":"2024-03-04T10:00:00","end":"2024-04-29T11:00:00","frequency":"weekly"}' \
//!     | roombook occurrences
//!
//! # Occurrences as UTC instants, using the timezone from a settings file
//! roombook --config settings.json occurrences -i booking.json --utc
//!
//! # Collisions between a candidate and stored reservations
//! roombook collisions -i check.json
//!
//! # Full validation of a raw form; exits with status 1 on errors
//! roombook -v validate -i form.json
//!
//! # iCalendar DTSTART/RRULE/EXDATE lines
//! roombook ical -i booking.json
//!
//! # Booked hours, and whether the booking counts as heavy for its room
//! roombook --config settings.json usage -i usage.json
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use roombook_engine::ical::to_ical;
use roombook_engine::usage::{booked_hours, is_heavy};
use roombook_engine::zone::occurrences_utc;
use roombook_engine::{
    find_collisions, occurrences, validate_value, CollisionMode, CollisionReport, EngineSettings,
    Reservation, Room,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, Read};
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "roombook",
    version,
    about = "Room reservation recurrence and collision checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine settings as a JSON file (timezone, DST policy, heavy-booking thresholds)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log more (-v for debug, -vv for trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the occurrences of a reservation
    Occurrences {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Last date to enumerate, inclusive (YYYY-MM-DD)
        #[arg(long)]
        until: Option<NaiveDate>,
        /// Print UTC instants in the configured timezone
        #[arg(long)]
        utc: bool,
    },
    /// Find collisions between a candidate and existing reservations
    Collisions {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only report whether any collision exists
        #[arg(long)]
        any: bool,
    },
    /// Validate a raw reservation form against rooms and existing reservations
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Do not look for collisions
        #[arg(long)]
        skip_collisions: bool,
    },
    /// Print the iCalendar recurrence of a reservation
    Ical {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Report booked hours and whether a reservation is heavy for its room
    Usage {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Deserialize)]
struct CollisionInput {
    candidate: Reservation,
    #[serde(default)]
    others: Vec<Reservation>,
}

#[derive(Deserialize)]
struct ValidateInput {
    reservation: Value,
    #[serde(default)]
    rooms: Vec<Room>,
    #[serde(default)]
    others: Vec<Reservation>,
}

#[derive(Deserialize)]
struct UsageInput {
    reservation: Reservation,
    room: Room,
}

#[derive(Serialize)]
struct UsageOutput {
    booked_hours: f64,
    heavy: bool,
}

#[derive(Serialize)]
struct CollisionOutput {
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
    with_id: Option<roombook_engine::ReservationId>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(cli.config.as_deref())?;
    tracing::debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Occurrences { input, until, utc } => {
            let reservation: Reservation = read_json(input.as_deref())?;
            let output = if utc {
                let periods =
                    occurrences_utc(&reservation, until, &settings.timezone, settings.dst_policy)
                        .context("Failed to convert occurrences to UTC")?;
                serde_json::to_string_pretty(&periods)?
            } else {
                serde_json::to_string_pretty(&occurrences(&reservation, until))?
            };
            println!("{}", output);
        }
        Commands::Collisions { input, any } => {
            let CollisionInput { candidate, others } = read_json(input.as_deref())?;
            let mode = if any {
                CollisionMode::FirstOnly
            } else {
                CollisionMode::CollectAll
            };

            let output = match find_collisions(&candidate, &others, mode) {
                CollisionReport::Found(found) => serde_json::to_string(&found)?,
                CollisionReport::Collisions(collisions) => {
                    let rows: Vec<CollisionOutput> = collisions
                        .iter()
                        .map(|collision| CollisionOutput {
                            start: collision.period.start,
                            end: collision.period.end,
                            with_id: collision.with.id,
                        })
                        .collect();
                    serde_json::to_string_pretty(&rows)?
                }
            };
            println!("{}", output);
        }
        Commands::Validate {
            input,
            skip_collisions,
        } => {
            let ValidateInput {
                reservation,
                rooms,
                others,
            } = read_json(input.as_deref())?;

            let errors = validate_value(&reservation, &rooms, &others, skip_collisions);
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            println!("{}", serde_json::to_string_pretty(&messages)?);

            if !errors.is_empty() {
                process::exit(1);
            }
        }
        Commands::Ical { input } => {
            let reservation: Reservation = read_json(input.as_deref())?;
            let text = to_ical(&reservation, &settings.timezone)
                .context("Failed to export iCalendar text")?;
            println!("{}", text);
        }
        Commands::Usage { input } => {
            let UsageInput { reservation, room } = read_json(input.as_deref())?;
            let output = UsageOutput {
                booked_hours: booked_hours(&reservation),
                heavy: is_heavy(&reservation, &room, &settings),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .init();
}

fn load_settings(path: Option<&str>) -> Result<EngineSettings> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            EngineSettings::from_json(&json)
                .with_context(|| format!("Invalid config file: {}", path))
        }
        None => Ok(EngineSettings::default()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&str>) -> Result<T> {
    let text = read_input(path)?;
    serde_json::from_str(&text).context("Failed to parse input JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
