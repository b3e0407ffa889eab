//! Timestamp helpers.

use chrono::{DateTime, Utc};

/// Represents a timestamp that can be serialized/deserialized.
pub type Timestamp = DateTime<Utc>;

/// Returns the current UTC timestamp.
#[must_use]
pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// Returns the current UTC time as an ISO 8601 formatted string.
///
/// # Examples
///
/// ```
/// use insightflow::utils::iso_timestamp;
///
/// let ts = iso_timestamp();
/// assert!(ts.contains('T'));
/// assert!(ts.ends_with("+00:00"));
/// ```
#[must_use]
pub fn iso_timestamp() -> String {
    format_iso8601(&Utc::now())
}

/// Formats a timestamp as ISO 8601 string.
#[must_use]
pub fn format_iso8601(dt: &Timestamp) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}

/// Formats the calendar date of a timestamp (`YYYY-MM-DD`).
#[must_use]
pub fn format_date(dt: &Timestamp) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Formats the wall-clock time of a timestamp (`HH:MM:SS`).
#[must_use]
pub fn format_time(dt: &Timestamp) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Formats date and time for display (`YYYY-MM-DD HH:MM:SS UTC`).
#[must_use]
pub fn format_datetime(dt: &Timestamp) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
