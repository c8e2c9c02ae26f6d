//! Screen definitions for the chatline TUI.

pub mod chat;
pub mod welcome;

pub use chat::ChatScreen;

use crate::app::App;
use crate::ui::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(theme: &Theme, area: Rect, buf: &mut Buffer) {
    use crate::ui::centered_fixed;
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};

    let help_text = r"
  Chat
    Enter             Send message
    Shift+Enter       New line
    Ctrl+J            New line
    Alt+1..9          Send a suggestion
    Up/Down, PgUp/Dn  Scroll transcript

  General
    Ctrl+T            Toggle light/dark
    F1                Toggle this help
    Esc / Ctrl+C      Quit

  [Press any key to close]
";

    let width = 50.min(area.width.saturating_sub(4));
    let height = 18.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_active())
        .style(theme.text_style());

    Paragraph::new(help_text)
        .block(block)
        .style(theme.text_style())
        .render(overlay_area, buf);
}
