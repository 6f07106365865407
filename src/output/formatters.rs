//! Reusable formatting utilities for CLI output
//!
//! Turns loosely typed record fields into display strings.

use chrono::DateTime;
use serde_json::Value;

/// Cells longer than this are cut in table output
pub const MAX_CELL_WIDTH: usize = 60;

/// Record keys whose values are timestamps
const DATE_KEYS: [&str; 4] = ["dateAdded", "lastModified", "eventDate", "publishDate"];

/// Render a platform timestamp (`2014-11-03T10:15:00-05:00`) in local time.
///
/// Values that do not parse are returned as they came.
///
/// # Example output
/// `11/03/2014 16:15 +01:00`
pub fn format_date_local(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt
            .with_timezone(&chrono::Local)
            .format("%m/%d/%Y %H:%M %:z")
            .to_string(),
        Err(_) => value.to_string(),
    }
}

pub fn is_date_key(key: &str) -> bool {
    DATE_KEYS.contains(&key)
}

/// Render one field value for display.
///
/// Strings lose their quotes, null becomes empty, nested values stay JSON.
pub fn format_value(key: &str, value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) if is_date_key(key) => format_date_local(s),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

/// Cut `s` to `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
