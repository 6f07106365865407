//! Typed records and request bodies
//!
//! Records keep only the fields shared by most responses; anything else is
//! still reachable through the untyped [`Records`](super::Records) view.

use serde::{Deserialize, Serialize};

use super::path::{escape_data_string, group_path, indicator_path};
use super::query::{GroupKind, IndicatorType};
use crate::error::QueryError;

/// Owner (organization or community)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: u64,
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<String>,
}

/// Adversary, email, incident, signature or threat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: u64,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,

    /// Incidents only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

/// Observable record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub indicator_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: u64,

    #[serde(rename = "type")]
    pub attribute_type: String,

    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityLabel {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Victim {
    pub id: u64,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suborg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictimAsset {
    pub id: u64,
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body for groups that need nothing but a name (adversaries, threats)
#[derive(Debug, Clone, Serialize)]
pub struct NewGroup {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmail {
    pub name: String,
    pub subject: String,
    pub header: String,
    pub body: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// Incident to create. `event_date` is converted to the platform layout on send.
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub name: String,
    pub event_date: String,
}

/// Wire form of [`NewIncident`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IncidentBody {
    pub name: String,
    pub event_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSignature {
    pub name: String,
    pub file_name: String,
    /// e.g. `Snort`, `YARA`, `ClamAV`
    pub file_type: String,
    pub file_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAttribute {
    #[serde(rename = "type")]
    pub attribute_type: String,
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayed: Option<bool>,
}

/// Entity that owns attributes, tags and security labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    Group(GroupKind, u64),
    Indicator(IndicatorType, String),
}

impl EntityRef {
    /// Path of the entity itself
    pub fn path(&self) -> Result<String, QueryError> {
        match self {
            EntityRef::Group(kind, id) => Ok(group_path(*kind, *id)),
            EntityRef::Indicator(t, value) => indicator_path(*t, value),
        }
    }

    pub(crate) fn attributes_path(&self) -> Result<String, QueryError> {
        Ok(format!("{}/attributes", self.path()?))
    }

    pub(crate) fn attribute_path(&self, attribute_id: u64) -> Result<String, QueryError> {
        Ok(format!("{}/attributes/{}", self.path()?, attribute_id))
    }

    pub(crate) fn tag_path(&self, name: &str) -> Result<String, QueryError> {
        if name.is_empty() {
            return Err(QueryError::EmptyValue("tag"));
        }
        Ok(format!("{}/tags/{}", self.path()?, escape_data_string(name)))
    }

    pub(crate) fn security_label_path(&self, name: &str) -> Result<String, QueryError> {
        if name.is_empty() {
            return Err(QueryError::EmptyValue("security label"));
        }
        Ok(format!(
            "{}/securityLabels/{}",
            self.path()?,
            escape_data_string(name)
        ))
    }
}
