//! chatline-tui: Terminal UI for the chatline webhook chat client
//!
//! This crate provides the interactive layer, including:
//! - The chat screen with welcome suggestions and a growing input bar
//! - Light and dark themes
//! - Background dispatch that never blocks the event loop
//! - Headless mode for testing and automation

mod app;
mod dispatch;
mod event;
pub mod headless;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod text;
mod ui;

use screens::Screen as ScreenTrait;

pub use app::App;
pub use dispatch::ReplyTask;
pub use event::{Action, Event, EventHandler};
pub use chatline_engine;

use chatline_engine::{Config, Dispatcher};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on exit.
pub async fn run_tui(
    config: &Config,
    dispatcher: Dispatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    info!(url = %dispatcher.url(), "chat session started");

    // 10 Hz keeps the spinner moving.
    let mut events = EventHandler::new(100);

    let result = run_loop(&mut terminal, &mut app, &dispatcher, &mut events).await;

    terminal.show_cursor()?;
    info!(messages = app.transcript.len(), "chat session ended");

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reply_task = ReplyTask::new();
    let screen = screens::ChatScreen::new();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            screen.render(app, area, buf);
            if app.show_help {
                screens::render_help_overlay(&app.theme(), area, buf);
            }
        })?;

        reply_task.poll(app).await;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => app.handle_action(event::key_to_action(key)),
                Event::Mouse(mouse) => app.handle_action(event::mouse_to_action(mouse)),
                Event::Paste(text) => app.paste(&text),
                Event::Tick => app.tick(),
                // The next draw picks up the new size.
                Event::Resize(_, _) => {}
            }
        }

        reply_task.start(app, dispatcher);

        if app.should_quit {
            reply_task.abort();
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
