//! Date and datetime handling for the value engine
//!
//! The store keeps every temporal value as a `chrono::DateTime<Utc>`.
//! External input arrives as strings in a handful of accepted shapes; output
//! uses one of three canonical formats:
//!
//! - projection (`%Y-%m-%d %H:%M:%S`): the text form written into the
//!   searchable string projection of a datetime slot
//! - wire date (`%Y-%m-%d`): what `get_value` returns for `date` attributes
//! - wire datetime (ISO 8601 with offset): what `get_value` returns for
//!   `datetime` attributes

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Format used for the searchable string projection of datetime slots
pub const PROJECTION_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wire format for `date` attributes
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for `datetime` attributes (ISO 8601 with offset)
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Parse a date-like string into a UTC datetime
///
/// Accepted shapes, tried in order:
/// 1. RFC 3339 (`2023-06-01T12:30:00+02:00`, converted to UTC)
/// 2. `YYYY-MM-DD HH:MM:SS` (assumed UTC)
/// 3. `YYYY-MM-DDTHH:MM:SS` (assumed UTC)
/// 4. `YYYY-MM-DD` (midnight UTC)
///
/// Returns None for anything else; the caller maps that to a
/// type-conversion error with attribute context.
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    None
}

/// Canonical projection text for a datetime (`YYYY-MM-DD HH:MM:SS`)
pub fn format_projection(dt: &DateTime<Utc>) -> String {
    dt.format(PROJECTION_FORMAT).to_string()
}

/// Wire text for a `date` attribute (`YYYY-MM-DD`)
pub fn format_wire_date(dt: &DateTime<Utc>) -> String {
    dt.format(WIRE_DATE_FORMAT).to_string()
}

/// Wire text for a `datetime` attribute (ISO 8601 with offset)
pub fn format_wire_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(WIRE_DATETIME_FORMAT).to_string()
}
