//! Full-width input bar widget.
//!
//! Grows with its content up to [`MAX_INPUT_LINES`] rows. The bottom border
//! shows whether a message can be sent right now.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;
use crate::ui::widgets::TextInputState;

/// Most rows the input bar grows to before scrolling.
pub const MAX_INPUT_LINES: usize = 8;

const PROMPT: &str = "> ";
const CONTINUATION: &str = "  ";
const PLACEHOLDER: &str = "Type a message...";

/// Full-width input bar for text entry.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    focused: bool,
    waiting: bool,
    can_send: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            focused: true,
            waiting: false,
            can_send: false,
        }
    }

    /// Set whether the input bar is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set whether a reply is pending.
    #[must_use]
    pub fn waiting(mut self, waiting: bool) -> Self {
        self.waiting = waiting;
        self
    }

    /// Set whether Enter would send.
    #[must_use]
    pub fn can_send(mut self, can_send: bool) -> Self {
        self.can_send = can_send;
        self
    }

    /// Total height (including borders) for the input at the given outer width.
    #[allow(clippy::cast_possible_truncation)]
    pub fn height_for(input: &TextInputState, width: u16) -> u16 {
        let text_width = text_width(width);
        input.visual_height(text_width, MAX_INPUT_LINES) as u16 + 2
    }

    fn send_hint(&self) -> Line<'static> {
        if self.waiting {
            Line::from(Span::styled(" waiting for reply ", self.theme.dim()))
        } else if self.can_send {
            Line::from(vec![
                Span::styled(" Enter ", self.theme.key_hint()),
                Span::styled(" Send ", self.theme.border_active()),
            ])
        } else {
            Line::from(Span::styled(" Enter  Send ", self.theme.dim()))
        }
    }
}

/// Columns available for text inside borders and prompt.
fn text_width(outer_width: u16) -> usize {
    usize::from(outer_width.saturating_sub(2)).saturating_sub(PROMPT.len())
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_active()
        } else {
            self.theme.border()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(self.theme.text_style())
            .title_bottom(self.send_hint().right_aligned());

        let inner_height = area.height.saturating_sub(2) as usize;

        if self.input.is_empty() {
            let mut spans = vec![Span::styled(PROMPT, self.theme.title())];
            if self.focused {
                spans.push(Span::styled(
                    super::text_input::CURSOR.to_string(),
                    self.theme.text_style(),
                ));
            }
            spans.push(Span::styled(PLACEHOLDER, self.theme.dim()));
            Paragraph::new(Line::from(spans))
                .block(block)
                .render(area, buf);
            return;
        }

        let (text_lines, cursor_line) = self
            .input
            .visual_lines(text_width(area.width), self.focused);

        let lines: Vec<Line<'static>> = text_lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let prefix = if i == 0 {
                    Span::styled(PROMPT, self.theme.title())
                } else {
                    Span::raw(CONTINUATION)
                };
                Line::from(vec![prefix, Span::styled(text, self.theme.text_style())])
            })
            .collect();

        // Keep the cursor line visible once content outgrows the bar.
        let scroll_offset = if lines.len() <= inner_height {
            0
        } else {
            cursor_line.saturating_sub(inner_height.saturating_sub(1))
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll_offset as u16, 0))
            .render(area, buf);
    }
}
