//! Headless mode for the chatline TUI.
//!
//! Runs the full event loop against a [`TestBackend`] instead of a real
//! terminal. Actions are sent via a channel and the rendered screen plus the
//! interesting bits of app state are published after each frame.

use crate::app::App;
use crate::dispatch::ReplyTask;
use crate::event::Action;
use crate::screens::{self, ChatScreen, Screen};
use chatline_engine::{Config, Dispatcher, ThemeMode};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Whether a reply is pending.
    pub waiting: bool,
    /// Whether Enter would send right now.
    pub send_enabled: bool,
    /// Messages in the transcript.
    pub message_count: usize,
    /// Content of the newest message.
    pub last_message: Option<String>,
    /// Active colour scheme.
    pub theme_mode: ThemeMode,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

impl HeadlessState {
    fn capture(app: &App, screen_contents: String) -> Self {
        Self {
            screen_contents,
            waiting: app.waiting,
            send_enabled: app.can_send(),
            message_count: app.transcript.len(),
            last_message: app.transcript.last().map(|m| m.content.clone()),
            theme_mode: app.theme_mode,
            should_quit: app.should_quit,
            show_help: app.show_help,
        }
    }
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    action_tx: mpsc::UnboundedSender<Action>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.action_tx.send(action).is_ok()
    }

    /// Type `text` one character at a time.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|c| self.send_action(Action::Char(c)))
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                _ => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 20,
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background task.
///
/// # Example
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(&config, dispatcher, HeadlessConfig::default());
///
/// handle.type_text("Hola");
/// handle.send_action(Action::Submit);
/// let state = handle.wait_for(|s| !s.waiting, Duration::from_secs(1)).await;
///
/// handle.send_action(Action::Quit);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless(
    config: &Config,
    dispatcher: Dispatcher,
    headless: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let app = App::new(config);

    let task = tokio::spawn(async move {
        run_headless_loop(app, dispatcher, headless, action_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle {
        action_tx,
        state_rx,
    };

    (handle, task)
}

async fn run_headless_loop(
    mut app: App,
    dispatcher: Dispatcher,
    config: HeadlessConfig,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;
    let mut reply_task = ReplyTask::new();

    let tick_duration = Duration::from_millis(config.tick_rate_ms);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            ChatScreen::new().render(&app, area, buf);
            if app.show_help {
                screens::render_help_overlay(&app.theme(), area, buf);
            }
        })?;

        let screen_contents = buffer_to_string(terminal.backend().buffer());
        let _ = state_tx.send(HeadlessState::capture(&app, screen_contents));

        if app.should_quit {
            reply_task.abort();
            break;
        }

        reply_task.start(&mut app, &dispatcher);
        reply_task.poll(&mut app).await;

        tokio::select! {
            Some(action) = action_rx.recv() => app.handle_action(action),
            () = tokio::time::sleep(tick_duration) => app.tick(),
        }
    }

    Ok(())
}

/// Convert a terminal buffer to a string, one line per row with trailing
/// spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}
