//! chatline-engine: Headless engine for the chatline webhook chat client
//!
//! This crate provides everything that does not touch the terminal:
//! - Configuration loading and defaults
//! - The in-memory chat transcript
//! - The webhook transport and the message dispatcher
//! - Bold/newline formatting of replies

pub mod chat;
pub mod config;
pub mod dispatcher;
pub mod format;
pub mod transport;

// Re-export commonly used types
pub use chat::{ChatMessage, Role, Transcript};
pub use config::{Config, ConfigError, Messages, ThemeMode, DEFAULT_WEBHOOK_URL};
pub use dispatcher::{DispatchError, Dispatcher, InFlightGuard, Outcome, Reply};
pub use format::{format_response, FormattedText, Inline};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse, WebhookRequest};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
