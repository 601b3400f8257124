pub mod event;
pub mod forecast;
pub mod location;

pub use event::Event;
pub use forecast::Forecast;
pub use location::{Coordinates, Location};

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::constants::DATE_FORMAT;

#[derive(Debug, Error)]
pub enum DateError {
    #[error("Unix timestamp out of range: {0}")]
    OutOfRange(i64),

    #[error("Invalid ISO-8601 timestamp: {0}")]
    Invalid(String),
}

/// Calendar date of a UTC instant, without time of day.
#[must_use]
pub fn calendar_date(instant: DateTime<Utc>) -> String {
    instant.format(DATE_FORMAT).to_string()
}

pub fn date_from_unix(seconds: i64) -> Result<String, DateError> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(calendar_date)
        .ok_or(DateError::OutOfRange(seconds))
}

/// Accepts RFC 3339 with an offset, or a bare `YYYY-MM-DDTHH:MM:SS` read as UTC.
pub fn date_from_iso(timestamp: &str) -> Result<String, DateError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(calendar_date(instant.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| calendar_date(naive.and_utc()))
        .map_err(|_| DateError::Invalid(timestamp.to_string()))
}
