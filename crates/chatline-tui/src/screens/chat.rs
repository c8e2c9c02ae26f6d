//! The chat screen: header, transcript (or welcome panel), input bar and status bar.

use super::welcome::render_welcome;
use super::Screen;
use crate::app::App;
use crate::text::{visual_width, wrap_plain, wrap_styled};
use crate::ui::theme::{spinner_frame, Symbols, Theme};
use crate::ui::widgets::{InputBar, KeyHint, StatusBar};
use crate::ui::chat_layout;
use chatline_engine::{format_response, ChatMessage, Role, ThemeMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Columns the message body is indented under its label.
const INDENT: &str = "  ";

/// The one and only screen.
#[derive(Debug, Default)]
pub struct ChatScreen;

impl ChatScreen {
    pub fn new() -> Self {
        Self
    }

    fn render_header(app: &App, theme: &Theme, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, theme.status_bar());
        buf.set_string(area.x, area.y, " chatline ", theme.title());

        let indicator = match app.theme_mode {
            ThemeMode::Light => format!("{} Light ", Symbols::LIGHT),
            ThemeMode::Dark => format!("{} Dark ", Symbols::DARK),
        };
        let width = u16::try_from(visual_width(&indicator)).unwrap_or(area.width);
        if width < area.width {
            buf.set_string(
                area.x + area.width - width,
                area.y,
                indicator,
                theme.status_bar(),
            );
        }
    }

    fn render_transcript(app: &App, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let lines = transcript_lines(app, theme, usize::from(area.width));
        let height = usize::from(area.height);

        // Anchored to the newest line; scroll_offset counts lines up from there.
        let max_offset = lines.len().saturating_sub(height);
        let offset = app.scroll_offset.min(max_offset);
        let end = lines.len() - offset;
        let start = end.saturating_sub(height);

        Paragraph::new(lines[start..end].to_vec())
            .style(theme.text_style())
            .render(area, buf);
    }
}

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let theme = app.theme();
        buf.set_style(area, theme.text_style());

        let input_height = InputBar::height_for(&app.input, area.width);
        let layout = chat_layout(area, input_height);

        Self::render_header(app, &theme, layout.header, buf);

        if app.welcome_visible() {
            render_welcome(app, &theme, layout.body, buf);
        } else {
            Self::render_transcript(app, &theme, layout.body, buf);
        }

        InputBar::new(&app.input, &theme)
            .focused(app.input_focused)
            .waiting(app.waiting)
            .can_send(app.can_send())
            .render(layout.input, buf);

        let mut hints = vec![
            KeyHint::new("Enter", "Send"),
            KeyHint::new("Ctrl+T", "Theme"),
        ];
        if app.suggestions_available() {
            hints.push(KeyHint::new("Alt+1-9", "Suggest"));
        }
        hints.push(KeyHint::new("F1", "Help"));
        hints.push(KeyHint::new("Esc", "Quit"));

        StatusBar::new(&theme)
            .hints(hints)
            .right(webhook_host(&app.webhook_url))
            .render(layout.status, buf);
    }
}

/// Host part of the webhook URL, for display.
fn webhook_host(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

/// All transcript lines at the given width, oldest first.
pub fn transcript_lines(app: &App, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let body_width = width.saturating_sub(INDENT.len());
    let mut lines = Vec::new();

    for message in app.transcript.messages() {
        lines.extend(message_lines(theme, message, body_width));
        lines.push(Line::from(""));
    }

    if app.waiting {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(
                format!("{} Waiting for response...", spinner_frame(app.tick)),
                theme.dim(),
            ),
        ]));
    }

    lines
}

fn message_lines(theme: &Theme, message: &ChatMessage, width: usize) -> Vec<Line<'static>> {
    let time = message.timestamp.format("%H:%M").to_string();
    let mut lines = Vec::new();

    match message.role {
        Role::User => {
            lines.push(Line::from(vec![
                Span::styled("You", theme.user_label()),
                Span::styled(format!("  {time}"), theme.dim()),
            ]));
            for text in wrap_plain(&message.content, width) {
                lines.push(Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled(text, theme.text_style()),
                ]));
            }
        }
        Role::Assistant => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} Assistant", Symbols::ASSISTANT),
                    theme.assistant_label(),
                ),
                Span::styled(format!("  {time}"), theme.dim()),
            ]));

            let base = if message.fallback {
                theme.error()
            } else {
                theme.text_style()
            };

            for inlines in format_response(&message.content).lines {
                let spans: Vec<Span<'static>> = inlines
                    .into_iter()
                    .map(|inline| {
                        let style = if inline.bold {
                            base.add_modifier(Modifier::BOLD)
                        } else {
                            base
                        };
                        Span::styled(inline.text, style)
                    })
                    .collect();
                for mut line in wrap_styled(&spans, width) {
                    line.spans.insert(0, Span::raw(INDENT));
                    lines.push(line);
                }
            }
        }
    }

    lines
}
