//! HTTP transport
//!
//! The [`Transport`] trait is the seam between request preparation (path,
//! signature, target URL) and the network. [`HttpTransport`] is the reqwest
//! implementation; tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client as HttpClient, Method, Response, StatusCode, Url};
use serde_json::Value;

use super::envelope::Envelope;
use super::rate_limit::{RateLimiterSet, RequestKind};
use crate::error::{Result, TransportError};

/// Header carrying the signing timestamp
pub const TIMESTAMP_HEADER: &str = "Timestamp";

/// A fully prepared request: target fixed, signature computed.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub timestamp: i64,
    pub authorization: String,
    pub body: Option<Value>,
}

/// Sends prepared requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send and decode the JSON envelope.
    ///
    /// Non-success HTTP statuses whose body is a failure envelope are returned
    /// as that envelope so the caller sees the platform's own status text.
    async fn send(&self, request: ApiRequest) -> Result<Envelope>;

    /// Send and return the body as text, for endpoints that do not wrap
    /// their payload (signature downloads).
    async fn send_raw(&self, request: ApiRequest) -> Result<String>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    http: HttpClient,
    limiters: RateLimiterSet,
}

impl HttpTransport {
    /// Create a transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("tcop/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            http,
            limiters: RateLimiterSet::new(),
        })
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<Response> {
        let kind = RequestKind::from_method(&request.method);
        self.limiters.wait_for(kind).await;

        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .header(TIMESTAMP_HEADER, request.timestamp.to_string())
            .header(AUTHORIZATION, &request.authorization);

        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(TransportError::from)?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            self.limiters.activate(kind);
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Envelope> {
        let response = self.dispatch(&request).await?;
        let status = response.status();
        let retry_after = retry_after(&response);

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            let envelope: Envelope = serde_json::from_str(&text).map_err(|e| {
                TransportError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;
            return Ok(envelope);
        }

        if let Ok(envelope) = serde_json::from_str::<Envelope>(&text) {
            if !envelope.is_success() {
                debug!("HTTP {} with failure envelope", status);
                return Ok(envelope);
            }
        }

        Err(status_error(status, text, retry_after).into())
    }

    async fn send_raw(&self, request: ApiRequest) -> Result<String> {
        let response = self.dispatch(&request).await?;
        let status = response.status();
        let retry_after = retry_after(&response);

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(status_error(status, text, retry_after).into())
        }
    }
}

fn retry_after(response: &Response) -> Duration {
    let secs = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60);
    Duration::from_secs(secs)
}

/// Map an HTTP error status to a transport error.
fn status_error(status: StatusCode, body: String, retry_after: Duration) -> TransportError {
    let body_or = |fallback: &str| {
        if body.trim().is_empty() {
            fallback.to_string()
        } else {
            body.clone()
        }
    };

    match status {
        StatusCode::UNAUTHORIZED => TransportError::Unauthorized,
        StatusCode::FORBIDDEN => TransportError::Forbidden(body_or("Forbidden")),
        StatusCode::NOT_FOUND => TransportError::NotFound(body_or("Resource not found")),
        StatusCode::TOO_MANY_REQUESTS => TransportError::RateLimit(retry_after),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            TransportError::BadRequest(body_or("Bad request"))
        }
        status if status.is_server_error() => {
            TransportError::ServerError(body_or(&format!("Server error: {}", status)))
        }
        _ => TransportError::InvalidResponse(format!("Unexpected status code: {}", status)),
    }
}
