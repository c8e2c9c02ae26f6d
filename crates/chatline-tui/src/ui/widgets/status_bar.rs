//! Status bar widget.

use crate::text::{truncate_to_width, visual_width};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

/// A key hint for the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Status bar widget displayed at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    theme: &'a Theme,
    hints: Vec<KeyHint>,
    right_text: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            hints: Vec::new(),
            right_text: None,
        }
    }

    /// Add key hints.
    #[must_use]
    pub fn hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    /// Set right-aligned text.
    #[must_use]
    pub fn right(mut self, text: &'a str) -> Self {
        self.right_text = Some(text);
        self
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        buf.set_style(area, self.theme.status_bar());

        let mut spans = vec![Span::styled(" ", self.theme.status_bar())];
        for hint in &self.hints {
            spans.push(Span::styled(format!(" {} ", hint.key), self.theme.key_hint()));
            spans.push(Span::styled(
                format!(" {} ", hint.label),
                self.theme.key_label(),
            ));
        }

        let left_line = Line::from(spans);
        let left_width = left_line.width() as u16;
        buf.set_line(area.x, area.y, &left_line, area.width);

        // Right-aligned text, only where it does not overlap the hints.
        if let Some(text) = self.right_text {
            let available = usize::from(area.width.saturating_sub(left_width + 2));
            if available > 3 {
                let text = truncate_to_width(text, available);
                let text_width = visual_width(&text) as u16;
                let x = area.x + area.width - text_width - 1;
                buf.set_string(x, area.y, text, self.theme.status_bar());
            }
        }
    }
}
