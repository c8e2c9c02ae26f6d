//! Test utilities for chatline-tui rendering and dispatch tests.

use crate::app::App;
use crate::screens::{ChatScreen, Screen};
use async_trait::async_trait;
use chatline_engine::{
    Config, Dispatcher, Outcome, Reply, Transport, TransportError, TransportResponse,
    WebhookRequest,
};
use ratatui::{buffer::Buffer, layout::Rect};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub use crate::headless::buffer_to_string;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create an app from the default configuration.
pub fn create_test_app() -> App {
    App::new(&Config::default())
}

/// A reply as the dispatcher would produce it.
pub fn reply(content: &str, outcome: Outcome) -> Reply {
    Reply {
        content: content.to_string(),
        outcome,
        duration_ms: 0,
    }
}

/// Render the chat screen at the default size.
pub fn render_app_to_string(app: &App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buf = Buffer::empty(area);
    ChatScreen::new().render(app, area, &mut buf);
    buffer_to_string(&buf)
}

#[derive(Debug)]
enum StubMode {
    Reply,
    Hang,
    Gate,
}

/// In-memory transport that records request bodies.
#[derive(Debug)]
pub struct StubTransport {
    mode: StubMode,
    status: u16,
    body: String,
    bodies: Mutex<Vec<String>>,
    gate: Notify,
}

impl StubTransport {
    /// Answer every request with `status` and `body`.
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            mode: StubMode::Reply,
            status,
            body: body.to_string(),
            bodies: Mutex::new(Vec::new()),
            gate: Notify::new(),
        }
    }

    /// Never answer.
    pub fn hanging() -> Self {
        Self {
            mode: StubMode::Hang,
            ..Self::replying(0, "")
        }
    }

    /// Answer with `status` and `body` once [`release`](Self::release) is called.
    pub fn gated(status: u16, body: &str) -> Self {
        Self {
            mode: StubMode::Gate,
            ..Self::replying(status, body)
        }
    }

    /// Let one gated request complete.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Serialized request bodies, in order.
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    /// Dispatcher that posts through this stub.
    pub fn dispatcher(self: &Arc<Self>) -> Dispatcher {
        let mut config = Config::default();
        config.webhook_url = "http://hook.test/chat".into();
        Dispatcher::new(Arc::clone(self) as Arc<dyn Transport>, &config)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post_json(
        &self,
        _url: &str,
        request: &WebhookRequest,
    ) -> Result<TransportResponse, TransportError> {
        self.bodies
            .lock()
            .unwrap()
            .push(serde_json::to_string(request).unwrap());

        match self.mode {
            StubMode::Reply => {}
            StubMode::Hang => std::future::pending::<()>().await,
            StubMode::Gate => self.gate.notified().await,
        }

        Ok(TransportResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
