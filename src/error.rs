//! Error types for tcop

use std::time::Duration;
use thiserror::Error;

/// Result type alias for tcop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the library and CLI
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiFailure),

    #[error("Cannot convert date '{0}' to the platform timestamp format")]
    DateConversion(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Credential and configuration errors, raised before any request is signed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `tcop init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Access ID not configured. Run `tcop init` or set TCOP_ACCESS_ID.")]
    MissingAccessId,

    #[error("Secret key not configured. Run `tcop init` or set TCOP_SECRET_KEY.")]
    MissingSecretKey,

    #[error("Base URL not configured. Run `tcop init` or set TCOP_BASE_URL.")]
    MissingBaseUrl,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// A query that cannot be turned into exactly one request path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{family} cannot be filtered {filter}")]
    UnsupportedFilter {
        family: &'static str,
        filter: &'static str,
    },

    #[error("Sub-resource {suffix} is not available for this query")]
    UnsupportedSuffix { suffix: &'static str },

    #[error("Result limit must be between 1 and 500, got {0}")]
    InvalidLimit(u32),

    #[error("Pagination is not accepted on single-entity lookups")]
    PaginationOnSingleEntity,

    #[error("Empty value for {0}")]
    EmptyValue(&'static str),

    #[error("Request target differs from the signed path: signed '{signed}', sent '{sent}'")]
    TargetMismatch { signed: String, sent: String },

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Failures reaching the API or decoding its reply
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Authentication failed. Check your access ID and secret key.")]
    Unauthorized,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            TransportError::Network("Failed to connect to API".to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// The API answered, but with a status other than `Success`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API returned status '{status}'{}", message_suffix(.message))]
pub struct ApiFailure {
    /// Status string exactly as sent by the platform
    pub status: String,
    /// Optional explanatory message from the envelope
    pub message: Option<String>,
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}
