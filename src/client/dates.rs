//! Date conversion for request bodies
//!
//! The platform expects timestamps as `YYYY-MM-DDTHH:MM:SS±HH:MM`. Callers may
//! hand in RFC 3339, ISO dates with or without a time, or US-style
//! `MM/DD/YYYY` dates; values without an offset are taken as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// Output layout the API accepts
const PLATFORM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a caller-supplied date into a timestamp with offset.
pub fn parse_event_date(input: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
            }
        }
    }

    Err(Error::DateConversion(input.to_string()))
}

/// Reformat a caller-supplied date into the platform layout.
pub fn to_platform_date(input: &str) -> Result<String> {
    Ok(parse_event_date(input)?.format(PLATFORM_FORMAT).to_string())
}
