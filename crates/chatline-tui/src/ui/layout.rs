//! Layout helpers for the chatline TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Areas of the chat screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub header: Rect,
    pub body: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// Split the screen into header, body, input bar and status bar.
///
/// The input bar gets `input_height` rows; the body takes what is left.
pub fn chat_layout(area: Rect, input_height: u16) -> ChatLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .split(area);

    ChatLayout {
        header: chunks[0],
        body: chunks[1],
        input: chunks[2],
        status: chunks[3],
    }
}
