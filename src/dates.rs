//! Relative time formatting for comment timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_humanize::HumanTime;

/// Formats with an explicit offset, tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Formats without an offset, taken as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339, minute-precision date-times with or without an offset,
/// and bare dates (midnight). Anything without an offset, or with a `Z`
/// suffix, is taken as UTC.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    let trimmed = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Render `timestamp` relative to now, e.g. "3 days ago".
///
/// Unparseable input is returned unchanged.
pub fn format_relative(timestamp: &str) -> String {
    format_relative_at(timestamp, Utc::now())
}

/// Render `timestamp` relative to `now`.
pub fn format_relative_at(timestamp: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(timestamp) {
        Some(dt) => HumanTime::from(dt - now).to_string(),
        None => timestamp.to_string(),
    }
}
