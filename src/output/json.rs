//! JSON output: `{ "data": .., "meta": { timestamp, version, resultCount } }`

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: ?Sized> {
    pub data: &'a T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the output was produced (RFC 3339)
    pub timestamp: String,

    pub version: String,

    /// Total reported by the API, which may exceed the records on this page
    #[serde(rename = "resultCount", skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u64>,
}

impl Metadata {
    fn now(result_count: Option<u64>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            result_count,
        }
    }
}

/// Serialize local data (no API count) under `data`
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        data,
        meta: Metadata::now(None),
    })
}

/// Serialize flattened records, carrying the envelope's `resultCount`
pub fn format_records_json(
    records: &[Value],
    result_count: Option<u64>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        data: records,
        meta: Metadata::now(result_count),
    })
}
