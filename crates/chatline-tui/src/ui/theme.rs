//! Theme and styling definitions for the chatline TUI.
//!
//! Two palettes, Catppuccin Latte (light) and Mocha (dark). The active one is
//! chosen by [`ThemeMode`] and can be flipped at runtime.

use chatline_engine::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Theme color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Semantic
    pub error: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::latte()
    }
}

impl Theme {
    /// Palette for the given mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::latte(),
            ThemeMode::Dark => Self::mocha(),
        }
    }

    /// Catppuccin Latte (light).
    pub fn latte() -> Self {
        Self {
            base: Color::Rgb(239, 241, 245),    // #eff1f5
            surface: Color::Rgb(220, 224, 232), // #dce0e8

            text: Color::Rgb(76, 79, 105),    // #4c4f69
            subtext: Color::Rgb(92, 95, 119), // #5c5f77
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            primary: Color::Rgb(30, 102, 245),   // #1e66f5 (blue)
            secondary: Color::Rgb(23, 146, 153), // #179299 (teal)

            error: Color::Rgb(210, 15, 57), // #d20f39

            border: Color::Rgb(188, 192, 204),         // #bcc0cc
            border_focused: Color::Rgb(114, 135, 253), // #7287fd (lavender)
        }
    }

    /// Catppuccin Mocha (dark).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            primary: Color::Rgb(137, 180, 250),   // #89b4fa (blue)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            error: Color::Rgb(243, 139, 168), // #f38ba8

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// Default text.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.base)
    }

    /// Secondary information.
    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted).bg(self.base)
    }

    /// Headings and the app title.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .bg(self.base)
            .add_modifier(Modifier::BOLD)
    }

    /// Label above user messages.
    pub fn user_label(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .bg(self.base)
            .add_modifier(Modifier::BOLD)
    }

    /// Label above assistant messages.
    pub fn assistant_label(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .bg(self.base)
            .add_modifier(Modifier::BOLD)
    }

    /// Fallback (error) reply text.
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.base)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.base)
    }

    pub fn border_active(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.base)
    }

    /// Status bar background.
    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.subtext).bg(self.surface)
    }

    /// Key in a status bar hint.
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.base)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Label next to a key hint.
    pub fn key_label(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }
}

/// Indicator symbols.
pub struct Symbols;

impl Symbols {
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
    pub const LIGHT: &'static str = "☀";
    pub const DARK: &'static str = "☾";
    pub const ASSISTANT: &'static str = "●";
}

/// Spinner frame for the given tick.
pub fn spinner_frame(tick: usize) -> &'static str {
    Symbols::SPINNER[tick % Symbols::SPINNER.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        assert_eq!(Theme::for_mode(ThemeMode::Light), Theme::latte());
        assert_eq!(Theme::for_mode(ThemeMode::Dark), Theme::mocha());
    }

    #[test]
    fn test_palettes_differ() {
        assert!(matches!(Theme::latte().base, Color::Rgb(239, 241, 245)));
        assert!(matches!(Theme::mocha().base, Color::Rgb(30, 30, 46)));
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(0), "|");
        assert_eq!(spinner_frame(5), "/");
    }
}
