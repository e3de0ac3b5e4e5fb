//! Date parsing for filter bounds and sort keys.
//!
//! Accepts the shapes the API and the date inputs produce: RFC 3339
//! timestamps, zone-less `YYYY-MM-DDTHH:MM[:SS[.fff]]` and bare
//! `YYYY-MM-DD` (UTC midnight). Everything else is invalid and yields
//! `None`; callers decide what an invalid date means for them.
//!
//! Zone-less datetimes are read as UTC, unlike a browser's `Date`, which
//! reads them in local time. The plugin sandbox has no reliable local zone,
//! and UTC keeps filtering identical on every machine.

use crate::domain::{BoardError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a date string into milliseconds since the Unix epoch.
///
/// ```
/// use shlichus_board::filter::dates::parse_millis;
///
/// assert_eq!(parse_millis("1970-01-02"), Some(86_400_000));
/// assert_eq!(parse_millis("1970-01-01T00:00:01.500Z"), Some(1_500));
/// assert_eq!(parse_millis("next tuesday"), None);
/// ```
#[must_use]
pub fn parse_millis(value: &str) -> Option<i64> {
    parse_utc(value).map(|dt| dt.timestamp_millis())
}

/// Parses a date string into a UTC timestamp.
#[must_use]
pub fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Validates a date bound typed by the user.
///
/// Empty input clears the bound. Anything else must be a calendar date in
/// `YYYY-MM-DD` form, the same shape a browser date picker produces.
///
/// # Errors
///
/// Returns [`BoardError::InvalidDate`] when the input is not a valid date.
pub fn validate_bound(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| value.to_string())
        .map_err(|_| BoardError::InvalidDate(format!("{value} (expected YYYY-MM-DD)")))
}

/// Formats a listing date as `M/D/YYYY`, or returns `None` if unparsable.
#[must_use]
pub fn display_date(value: &str) -> Option<String> {
    parse_utc(value).map(|dt| dt.format("%-m/%-d/%Y").to_string())
}
