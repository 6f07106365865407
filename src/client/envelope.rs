//! Response envelopes and result flattening
//!
//! Every API reply is wrapped as
//!
//! ```json
//! { "status": "Success", "data": { "resultCount": 2, "adversary": [ ... ] } }
//! ```
//!
//! `data` maps a result category to either an array of records or a single
//! record. [`normalize`] checks the status; [`Records`] flattens the categories
//! into one sequence.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiFailure;

/// Status value of a successful envelope
pub const SUCCESS_STATUS: &str = "Success";

/// Metadata key inside `data`, never a result category
pub const RESULT_COUNT_KEY: &str = "resultCount";

/// Raw API response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Check the envelope status and keep its data for flattening.
pub fn normalize(envelope: Envelope) -> Result<Records, ApiFailure> {
    if !envelope.is_success() {
        return Err(ApiFailure {
            status: envelope.status,
            message: envelope.message,
        });
    }

    Ok(Records {
        data: envelope.data.unwrap_or_default(),
    })
}

/// Flattened view over a successful envelope's data.
///
/// Iteration is recomputed from the stored map on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Records {
    data: Map<String, Value>,
}

impl Records {
    /// Records in category order, arrays expanded, `resultCount` skipped.
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        self.data
            .iter()
            .filter(|(key, _)| key.as_str() != RESULT_COUNT_KEY)
            .flat_map(|(_, value)| match value {
                Value::Array(items) => items.as_slice(),
                single => std::slice::from_ref(single),
            })
    }

    /// `resultCount` as reported by the API, if present
    pub fn result_count(&self) -> Option<u64> {
        self.data.get(RESULT_COUNT_KEY).and_then(Value::as_u64)
    }

    /// Result category names, in order
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.data
            .keys()
            .map(String::as_str)
            .filter(|key| *key != RESULT_COUNT_KEY)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn first(&self) -> Option<&Value> {
        self.iter().next()
    }

    /// Decode every record into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        self.iter().map(|value| T::deserialize(value)).collect()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a Records {
    type Item = &'a Value;
    type IntoIter = Box<dyn Iterator<Item = &'a Value> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
