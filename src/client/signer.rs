//! Request signing
//!
//! Every request carries two headers:
//!
//! ```text
//! Timestamp: <unix seconds>
//! Authorization: TC <AccessId>:<Signature>
//! ```
//!
//! where `Signature = Base64(HMAC-SHA256(SecretKey, path + ":" + METHOD + ":" + timestamp))`.
//! The path is the exact request path including its query string.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::Credentials;

type HmacSha256 = Hmac<Sha256>;

/// Authorization scheme prefix
const AUTH_SCHEME: &str = "TC";

/// Signature material for a single request. Recompute for every send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: String,
    pub path: String,
    pub timestamp: i64,
    pub authorization: String,
}

/// Signs requests with one set of credentials
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Sign `method` + `path` with the current UTC second.
    pub fn sign(&self, method: &str, path: &str) -> SignedRequest {
        self.sign_at(method, path, Utc::now().timestamp())
    }

    /// Sign with a caller-supplied timestamp.
    pub fn sign_at(&self, method: &str, path: &str, timestamp: i64) -> SignedRequest {
        let message = string_to_sign(method, path, timestamp);
        let signature = compute_signature(self.credentials.secret_key(), &message);

        SignedRequest {
            method: method.to_string(),
            path: path.to_string(),
            timestamp,
            authorization: format!(
                "{} {}:{}",
                AUTH_SCHEME,
                self.credentials.access_id(),
                signature
            ),
        }
    }
}

/// `path:METHOD:timestamp`, method used as given.
pub fn string_to_sign(method: &str, path: &str, timestamp: i64) -> String {
    format!("{path}:{method}:{timestamp}")
}

/// Base64 HMAC-SHA256 of `message` keyed by `secret_key`.
pub fn compute_signature(secret_key: &str, message: &str) -> String {
    // HMAC accepts keys of any length, including empty
    let mut mac =
        HmacSha256::new_from_slice(secret_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
