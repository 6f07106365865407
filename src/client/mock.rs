//! Mock transport for testing
//!
//! Replies are queued up front and handed out in order; every request the
//! client prepares is captured for assertions.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::envelope::Envelope;
use super::transport::{ApiRequest, Transport};
use crate::error::{Result, TransportError};

/// One queued reply
#[derive(Debug)]
enum Reply {
    Envelope(Envelope),
    Raw(String),
    Error(TransportError),
}

/// Transport that never touches the network.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new().with_envelope(envelope);
/// let client = ThreatClient::with_transport(credentials, mock);
/// client.list(&query).await?;
/// assert_eq!(client.transport().requests().await.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
    /// Fail with a rate limit once this many requests were sent
    rate_limit_after: Option<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an envelope for the next `send`.
    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.replies.get_mut().push_back(Reply::Envelope(envelope));
        self
    }

    /// Queue a raw body for the next `send_raw`.
    pub fn with_raw(mut self, body: &str) -> Self {
        self.replies.get_mut().push_back(Reply::Raw(body.to_string()));
        self
    }

    /// Queue an error for the next call.
    pub fn with_error(mut self, error: TransportError) -> Self {
        self.replies.get_mut().push_back(Reply::Error(error));
        self
    }

    pub fn rate_limit_after(mut self, calls: usize) -> Self {
        self.rate_limit_after = Some(calls);
        self
    }

    /// Requests seen so far, in send order
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self, request: ApiRequest) -> Result<Reply> {
        let sent = {
            let mut requests = self.requests.lock().await;
            requests.push(request);
            requests.len()
        };

        if let Some(threshold) = self.rate_limit_after {
            if sent > threshold {
                return Err(TransportError::RateLimit(std::time::Duration::from_secs(60)).into());
            }
        }

        match self.replies.lock().await.pop_front() {
            Some(Reply::Error(e)) => Err(e.into()),
            Some(reply) => Ok(reply),
            None => Err(TransportError::InvalidResponse("No mock reply queued".to_string()).into()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Envelope> {
        match self.next_reply(request).await? {
            Reply::Envelope(envelope) => Ok(envelope),
            other => Err(TransportError::InvalidResponse(format!(
                "Expected an envelope reply, got {:?}",
                other
            ))
            .into()),
        }
    }

    async fn send_raw(&self, request: ApiRequest) -> Result<String> {
        match self.next_reply(request).await? {
            Reply::Raw(body) => Ok(body),
            Reply::Envelope(envelope) => Ok(serde_json::to_string(&envelope)?),
            Reply::Error(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Method, Url};

    fn request(path: &str) -> ApiRequest {
        ApiRequest {
            method: Method::GET,
            url: Url::parse(&format!("https://api.example.com{}", path)).unwrap(),
            timestamp: 1_500_000_000,
            authorization: "TC id:sig".to_string(),
            body: None,
        }
    }

    fn envelope() -> Envelope {
        serde_json::from_str(r#"{"status":"Success"}"#).unwrap()
    }

    #[tokio::test]
    async fn test_replies_in_order() {
        let mock = MockTransport::new()
            .with_envelope(envelope())
            .with_error(TransportError::Unauthorized);

        assert!(mock.send(request("/v2/owners")).await.is_ok());
        assert!(mock.send(request("/v2/owners")).await.is_err());
        assert_eq!(mock.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_queue_is_an_error() {
        let mock = MockTransport::new();
        assert!(mock.send(request("/v2/tags")).await.is_err());
    }

    #[tokio::test]
    async fn test_rate_limit_after() {
        let mock = MockTransport::new()
            .with_envelope(envelope())
            .with_envelope(envelope())
            .rate_limit_after(1);

        assert!(mock.send(request("/v2/tags")).await.is_ok());
        let err = mock.send(request("/v2/tags")).await.unwrap_err();
        assert!(err.to_string().contains("Rate limit"));
    }

    #[tokio::test]
    async fn test_captures_requests() {
        let mock = MockTransport::new().with_raw("rule x {}");

        mock.send_raw(request("/v2/groups/signatures/1/download"))
            .await
            .unwrap();

        let sent = mock.requests().await;
        assert_eq!(sent[0].url.path(), "/v2/groups/signatures/1/download");
        assert_eq!(sent[0].authorization, "TC id:sig");
    }
}
