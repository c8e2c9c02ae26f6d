//! Welcome panel - shown in place of the transcript until the first message.

use crate::app::App;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// Render the welcome heading and the numbered suggestions.
pub fn render_welcome(app: &App, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(app.messages.welcome_title.as_str(), theme.title())),
        Line::from(""),
        Line::from(Span::styled(
            app.messages.welcome_subtitle.as_str(),
            theme.dim(),
        )),
        Line::from(""),
    ];

    for (i, suggestion) in app.suggestions.iter().take(9).enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" Alt+{} ", i + 1), theme.key_hint()),
            Span::styled(format!("  {suggestion}"), theme.text_style()),
        ]));
        lines.push(Line::from(""));
    }

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(theme.text_style())
        .wrap(Wrap { trim: false })
        .render(area, buf);
}
