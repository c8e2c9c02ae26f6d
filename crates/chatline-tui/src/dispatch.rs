//! Background dispatch of the pending message.
//!
//! The event loop owns one [`ReplyTask`]. Each iteration it starts a task for
//! any text the app accepted and, without blocking, hands a finished reply
//! back to the app.

use crate::app::App;
use chatline_engine::{Dispatcher, Reply};
use tokio::task::JoinHandle;
use tracing::error;

/// The reply currently being fetched, if any.
#[derive(Debug, Default)]
pub struct ReplyTask {
    handle: Option<JoinHandle<Reply>>,
}

impl ReplyTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is running.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Spawn a request for text the app accepted since the last call.
    pub fn start(&mut self, app: &mut App, dispatcher: &Dispatcher) {
        if self.handle.is_some() {
            return;
        }
        if let Some(text) = app.take_pending_send() {
            let dispatcher = dispatcher.clone();
            self.handle = Some(tokio::spawn(async move { dispatcher.deliver(&text).await }));
        }
    }

    /// If the request has finished, show its reply. Never waits for a running request.
    pub async fn poll(&mut self, app: &mut App) {
        if !self.handle.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }
        let Some(handle) = self.handle.take() else {
            return;
        };
        match handle.await {
            Ok(reply) => app.finish_send(reply),
            Err(e) => {
                error!(error = %e, "dispatch task failed");
                app.abort_send();
            }
        }
    }

    /// Cancel the running request, if any.
    pub fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
