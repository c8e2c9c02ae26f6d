//! Message dispatcher.
//!
//! Posts one user message to the webhook and turns whatever comes back into
//! the text shown to the user. Failures never escape: every outcome becomes a
//! [`Reply`] whose content is either the webhook's `output` or one of the two
//! configured fallback texts.

use crate::config::{Config, Messages};
use crate::format::{format_response, FormattedText};
use crate::transport::{
    HttpTransport, Transport, TransportError, TransportResponse, WebhookRequest,
};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// How a dispatch ended.
#[derive(Debug)]
pub enum Outcome {
    /// The webhook returned a usable `output`.
    Answered,
    /// Well-formed response without a usable `output`.
    MissingOutput,
    /// The request or its response could not be used.
    Failed(DispatchError),
}

/// Text to show for one dispatch, plus how it was obtained.
#[derive(Debug)]
pub struct Reply {
    /// Message content as received, or a fallback text.
    pub content: String,
    /// Classification of the response.
    pub outcome: Outcome,
    /// Round-trip time in milliseconds.
    pub duration_ms: u64,
}

impl Reply {
    /// Content with bold and line-break formatting applied.
    pub fn formatted(&self) -> FormattedText {
        format_response(&self.content)
    }

    /// Whether the content is a fallback text rather than a webhook answer.
    pub fn is_fallback(&self) -> bool {
        !matches!(self.outcome, Outcome::Answered)
    }
}

/// Sends messages to the configured webhook.
///
/// Cloning is cheap; clones share the transport and the in-flight flag.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    url: String,
    messages: Messages,
    in_flight: Arc<AtomicBool>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("url", &self.url)
            .field("in_flight", &self.is_in_flight())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher with an explicit transport.
    pub fn new(transport: Arc<dyn Transport>, config: &Config) -> Self {
        Self {
            transport,
            url: config.webhook_url.clone(),
            messages: config.messages.clone(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a dispatcher that talks HTTP.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config.request_timeout())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Webhook URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether a [`send`](Self::send) is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Claim the in-flight flag for `raw`.
    ///
    /// Returns the trimmed text and a guard that releases the flag on drop,
    /// or `None` if the text is blank or another send holds the flag.
    pub fn try_begin(&self, raw: &str) -> Option<(String, InFlightGuard)> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        let guard = InFlightGuard {
            flag: Arc::clone(&self.in_flight),
        };
        Some((text.to_string(), guard))
    }

    /// Guarded send: no-op for blank input or while another send runs.
    pub async fn send(&self, raw: &str) -> Option<Reply> {
        let (text, _guard) = self.try_begin(raw)?;
        Some(self.deliver(&text).await)
    }

    /// Post `text` to the webhook and classify the result.
    ///
    /// Does not consult the in-flight flag; callers that own their own guard
    /// (such as the terminal UI) call this directly.
    pub async fn deliver(&self, text: &str) -> Reply {
        let start = Instant::now();
        debug!(url = %self.url, chars = text.chars().count(), "dispatching message");

        let request = WebhookRequest::new(text);
        let result = self.transport.post_json(&self.url, &request).await;

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;

        let reply = self.classify(result, duration_ms);
        match &reply.outcome {
            Outcome::Answered => debug!(duration_ms, "webhook answered"),
            Outcome::MissingOutput => warn!(duration_ms, "webhook response had no output"),
            Outcome::Failed(e) => warn!(duration_ms, error = %e, "webhook request failed"),
        }
        reply
    }

    fn classify(
        &self,
        result: Result<TransportResponse, TransportError>,
        duration_ms: u64,
    ) -> Reply {
        let outcome = match result {
            Err(e) => Err(DispatchError::Transport(e)),
            Ok(response) => parse_response(&response),
        };

        let (content, outcome) = match outcome {
            Ok(Some(output)) => (output, Outcome::Answered),
            Ok(None) => (self.messages.missing_output.clone(), Outcome::MissingOutput),
            Err(e) => (self.messages.transport_failure.clone(), Outcome::Failed(e)),
        };

        Reply {
            content,
            outcome,
            duration_ms,
        }
    }
}

/// Releases the dispatcher's in-flight flag when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Extract `output` from a response.
///
/// `Ok(None)` means the body parsed but carried nothing to show.
fn parse_response(response: &TransportResponse) -> Result<Option<String>, DispatchError> {
    if !response.is_success() {
        return Err(DispatchError::Status(response.status));
    }

    let value: Value = serde_json::from_str(&response.body).map_err(DispatchError::InvalidJson)?;

    match value {
        Value::Null => Err(DispatchError::NullBody),
        Value::Object(map) => match map.get("output") {
            Some(Value::String(s)) if !s.is_empty() => Ok(Some(s.clone())),
            Some(output) if is_truthy(output) => Err(DispatchError::UnformattableOutput),
            _ => Ok(None),
        },
        _ => Ok(None),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reasons a dispatch falls back to the transport-failure text.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Non-2xx status.
    #[error("Webhook returned HTTP {0}")]
    Status(u16),

    /// Body is not JSON.
    #[error("Invalid JSON in response: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Body is the JSON literal `null`.
    #[error("Response body is null")]
    NullBody,

    /// `output` is present but is not text.
    #[error("Response output is not a string")]
    UnformattableOutput,
}
