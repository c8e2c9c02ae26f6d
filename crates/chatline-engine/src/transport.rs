//! Webhook transport.
//!
//! [`Transport`] is the seam between the dispatcher and the network so that
//! tests can inject a stub. [`HttpTransport`] is the real implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JSON body posted to the webhook.
///
/// The field is spelled `mensage`; the remote side expects exactly that key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub mensage: String,
}

impl WebhookRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            mensage: text.into(),
        }
    }
}

/// Raw response from the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request to the webhook.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `request` as JSON to `url` and return status and body.
    async fn post_json(
        &self,
        url: &str,
        request: &WebhookRequest,
    ) -> Result<TransportResponse, TransportError>;
}

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport. `timeout` of `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Build)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        request: &WebhookRequest,
    ) -> Result<TransportResponse, TransportError> {
        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(TransportError::Request)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::Request)?;

        Ok(TransportResponse { status, body })
    }
}

/// Errors raised while talking to the webhook.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, timeout or body read failure.
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
}
