//! Application state and update logic for the chatline TUI.
//!
//! [`App`] is the single UI controller. It owns the in-flight flag: a message
//! can only be sent when the input is non-blank and no reply is pending.

use crate::event::Action;
use crate::ui::theme::Theme;
use crate::ui::widgets::TextInputState;
use chatline_engine::{ChatMessage, Config, Messages, Reply, ThemeMode, Transcript};
use tracing::debug;

/// Lines moved by one page scroll.
const PAGE_SCROLL: usize = 10;

/// Application state.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Message being typed.
    pub input: TextInputState,

    /// Whether the input bar has focus. Lost while the help overlay is open.
    pub input_focused: bool,

    /// Messages exchanged so far.
    pub transcript: Transcript,

    /// True from send until the reply (or fallback) is shown.
    pub waiting: bool,

    /// Active colour scheme.
    pub theme_mode: ThemeMode,

    /// Prompts offered on the welcome screen.
    pub suggestions: Vec<String>,

    /// Fixed texts (welcome heading, fallback replies).
    pub messages: Messages,

    /// Webhook endpoint, shown in the status bar.
    pub webhook_url: String,

    /// Transcript lines scrolled up from the bottom (0 = follow newest).
    pub scroll_offset: usize,

    /// Tick counter for animations.
    pub tick: usize,

    /// Text accepted by [`begin_send`](Self::begin_send) but not yet dispatched.
    pending_send: Option<String>,
}

impl App {
    /// Create the app from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            input: TextInputState::new(),
            input_focused: true,
            transcript: Transcript::new(),
            waiting: false,
            theme_mode: config.theme,
            suggestions: config.suggestions.clone(),
            messages: config.messages.clone(),
            webhook_url: config.webhook_url.clone(),
            scroll_offset: 0,
            tick: 0,
            pending_send: None,
        }
    }

    /// Palette for the active theme mode.
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.theme_mode)
    }

    /// Whether Enter would send: non-blank input and no reply pending.
    pub fn can_send(&self) -> bool {
        !self.input.is_blank() && !self.waiting
    }

    /// The welcome screen is shown until the first message.
    pub fn welcome_visible(&self) -> bool {
        self.transcript.is_empty()
    }

    /// Start sending the current input.
    ///
    /// Clears the input, sets the in-flight flag and appends the trimmed text
    /// as a user message. Returns the text to dispatch, or `None` (changing
    /// nothing) if the input is blank or a reply is already pending.
    pub fn begin_send(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }

        let text = self.input.take().trim().to_string();
        self.waiting = true;
        self.transcript.push(ChatMessage::user(text.clone()));
        self.scroll_to_bottom();

        debug!(chars = text.chars().count(), "message accepted");
        Some(text)
    }

    /// Show the reply and release the in-flight flag.
    pub fn finish_send(&mut self, reply: Reply) {
        let message = if reply.is_fallback() {
            ChatMessage::fallback(reply.content)
        } else {
            ChatMessage::assistant(reply.content)
        };
        self.transcript.push(message);
        self.release();
    }

    /// Release the in-flight flag when the dispatch task died without a reply.
    pub fn abort_send(&mut self) {
        self.transcript
            .push(ChatMessage::fallback(self.messages.transport_failure.clone()));
        self.release();
    }

    fn release(&mut self) {
        self.waiting = false;
        self.scroll_to_bottom();
    }

    /// Whether suggestions can be picked: only while the welcome panel shows them.
    pub fn suggestions_available(&self) -> bool {
        self.welcome_visible() && !self.suggestions.is_empty()
    }

    /// Put the suggestion at `index` in the input and send it immediately.
    pub fn use_suggestion(&mut self, index: usize) -> Option<String> {
        if self.waiting || !self.suggestions_available() {
            return None;
        }
        let suggestion = self.suggestions.get(index)?.clone();
        self.input.set(suggestion);
        self.begin_send()
    }

    /// Flip between light and dark for this session.
    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
    }

    /// Text waiting to be dispatched, if any.
    pub fn take_pending_send(&mut self) -> Option<String> {
        self.pending_send.take()
    }

    /// Insert pasted text at the cursor. Line breaks are kept.
    pub fn paste(&mut self, text: &str) {
        if self.show_help {
            return;
        }
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.input.insert_str(&text);
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Help overlay swallows the next action.
        if self.show_help {
            if action != Action::None {
                self.show_help = false;
                self.input_focused = true;
            }
            return;
        }

        match action {
            Action::Quit | Action::Back => self.should_quit = true,
            Action::Help => {
                self.show_help = true;
                self.input_focused = false;
            }
            Action::Submit => {
                if let Some(text) = self.begin_send() {
                    self.pending_send = Some(text);
                }
            }
            Action::Suggestion(index) => {
                if let Some(text) = self.use_suggestion(index) {
                    self.pending_send = Some(text);
                }
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::Newline => self.input.insert('\n'),
            Action::Char(c) => self.input.insert(c),
            Action::Backspace => self.input.backspace(),
            Action::Delete => self.input.delete(),
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            Action::PageUp => self.scroll_offset = self.scroll_offset.saturating_add(PAGE_SCROLL),
            Action::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(PAGE_SCROLL);
            }
            Action::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, reply};
    use chatline_engine::{Outcome, Role};

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(Action::Char(c));
        }
    }

    #[test]
    fn test_new_app_shows_welcome() {
        let app = create_test_app();
        assert!(app.welcome_visible());
        assert!(!app.waiting);
        assert!(!app.can_send());
    }

    #[test]
    fn test_can_send_requires_non_blank_input() {
        let mut app = create_test_app();
        type_text(&mut app, "   ");
        assert!(!app.can_send());

        type_text(&mut app, "Hola");
        assert!(app.can_send());
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut app = create_test_app();
        type_text(&mut app, " \t ");
        app.handle_action(Action::Submit);

        assert!(app.take_pending_send().is_none());
        assert!(app.transcript.is_empty());
        assert!(!app.waiting);
        assert_eq!(app.input.content(), " \t ");
    }

    #[test]
    fn test_submit_appends_user_message_and_waits() {
        let mut app = create_test_app();
        type_text(&mut app, "  Hola  ");
        app.handle_action(Action::Submit);

        assert_eq!(app.take_pending_send().as_deref(), Some("Hola"));
        assert!(app.waiting);
        assert!(app.input.is_empty());
        assert!(!app.welcome_visible());
        let last = app.transcript.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "Hola");
    }

    #[test]
    fn test_submit_while_waiting_is_rejected() {
        let mut app = create_test_app();
        type_text(&mut app, "uno");
        app.handle_action(Action::Submit);
        assert!(app.take_pending_send().is_some());

        type_text(&mut app, "dos");
        assert!(!app.can_send());
        app.handle_action(Action::Submit);

        assert!(app.take_pending_send().is_none());
        assert_eq!(app.transcript.len(), 1);
        assert_eq!(app.input.content(), "dos");
    }

    #[test]
    fn test_finish_send_releases_flag() {
        let mut app = create_test_app();
        type_text(&mut app, "Hola");
        app.handle_action(Action::Submit);
        app.handle_action(Action::ScrollUp);

        app.finish_send(reply("¡Hola!", Outcome::Answered));

        assert!(!app.waiting);
        assert!(app.input_focused);
        assert_eq!(app.scroll_offset, 0);
        let last = app.transcript.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "¡Hola!");
        assert!(!last.fallback);
        // Input is empty, so sending stays disabled.
        assert!(!app.can_send());
    }

    #[test]
    fn test_send_enabled_after_completion_with_typed_text() {
        let mut app = create_test_app();
        type_text(&mut app, "uno");
        app.handle_action(Action::Submit);
        type_text(&mut app, "dos");
        assert!(!app.can_send());

        app.finish_send(reply("ok", Outcome::MissingOutput));
        assert!(app.can_send());
        assert!(app.transcript.last().unwrap().fallback);
    }

    #[test]
    fn test_answer_matching_fallback_text_is_not_marked() {
        let mut app = create_test_app();
        type_text(&mut app, "Hola");
        app.handle_action(Action::Submit);

        let text = app.messages.transport_failure.clone();
        app.finish_send(reply(&text, Outcome::Answered));

        let last = app.transcript.last().unwrap();
        assert_eq!(last.content, text);
        assert!(!last.fallback);
    }

    #[test]
    fn test_abort_send_shows_transport_failure() {
        let mut app = create_test_app();
        type_text(&mut app, "Hola");
        app.handle_action(Action::Submit);

        app.abort_send();

        assert!(!app.waiting);
        let last = app.transcript.last().unwrap();
        assert_eq!(last.content, app.messages.transport_failure);
        assert!(last.fallback);
    }

    #[test]
    fn test_suggestion_fills_and_sends() {
        let mut app = create_test_app();
        let expected = app.suggestions[1].clone();

        app.handle_action(Action::Suggestion(1));

        assert_eq!(app.take_pending_send(), Some(expected.clone()));
        assert!(app.waiting);
        assert_eq!(app.transcript.last().unwrap().content, expected);
    }

    #[test]
    fn test_suggestions_only_while_welcome_visible() {
        let mut app = create_test_app();
        assert!(app.suggestions_available());

        app.handle_action(Action::Suggestion(0));
        assert!(app.take_pending_send().is_some());
        app.finish_send(reply("ok", Outcome::Answered));
        assert!(!app.waiting);
        assert!(!app.suggestions_available());

        app.handle_action(Action::Suggestion(1));
        assert!(app.take_pending_send().is_none());
        assert!(!app.waiting);
        assert_eq!(app.transcript.len(), 2);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_no_suggestions_configured() {
        let mut app = create_test_app();
        app.suggestions.clear();
        assert!(!app.suggestions_available());

        app.handle_action(Action::Suggestion(0));
        assert!(app.take_pending_send().is_none());
    }

    #[test]
    fn test_suggestion_out_of_range_or_waiting() {
        let mut app = create_test_app();
        app.handle_action(Action::Suggestion(99));
        assert!(app.take_pending_send().is_none());

        app.handle_action(Action::Suggestion(0));
        assert!(app.take_pending_send().is_some());
        app.handle_action(Action::Suggestion(1));
        assert!(app.take_pending_send().is_none());
        assert_eq!(app.transcript.len(), 1);
    }

    #[test]
    fn test_toggle_theme() {
        let mut app = create_test_app();
        assert_eq!(app.theme_mode, ThemeMode::Light);

        app.handle_action(Action::ToggleTheme);
        assert_eq!(app.theme_mode, ThemeMode::Dark);
        assert_eq!(app.theme(), Theme::mocha());

        app.handle_action(Action::ToggleTheme);
        assert_eq!(app.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn test_newline_and_editing() {
        let mut app = create_test_app();
        type_text(&mut app, "ab");
        app.handle_action(Action::Newline);
        type_text(&mut app, "c");
        app.handle_action(Action::Left);
        app.handle_action(Action::Backspace);
        assert_eq!(app.input.content(), "abc");
    }

    #[test]
    fn test_paste_inserts_at_cursor() {
        let mut app = create_test_app();
        type_text(&mut app, "ab");
        app.handle_action(Action::Left);

        app.paste("uno\r\ndos");

        assert_eq!(app.input.content(), "auno\ndosb");
        assert!(app.can_send());
    }

    #[test]
    fn test_scroll_bounds() {
        let mut app = create_test_app();
        app.handle_action(Action::ScrollDown);
        assert_eq!(app.scroll_offset, 0);

        app.handle_action(Action::PageUp);
        assert_eq!(app.scroll_offset, PAGE_SCROLL);
        app.handle_action(Action::ScrollDown);
        assert_eq!(app.scroll_offset, PAGE_SCROLL - 1);
    }

    #[test]
    fn test_help_closes_before_quit() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        assert!(app.show_help);

        app.handle_action(Action::Quit);
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_action(Action::Back);
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_takes_focus_from_input() {
        let mut app = create_test_app();
        assert!(app.input_focused);

        app.handle_action(Action::Help);
        assert!(!app.input_focused);

        app.handle_action(Action::Char('x'));
        assert!(app.input_focused);
    }

    #[test]
    fn test_reply_during_help_keeps_focus_on_help() {
        let mut app = create_test_app();
        type_text(&mut app, "Hola");
        app.handle_action(Action::Submit);
        app.handle_action(Action::Help);

        app.finish_send(reply("ok", Outcome::Answered));

        assert!(app.show_help);
        assert!(!app.input_focused);
    }

    #[test]
    fn test_help_swallows_text_input() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        app.handle_action(Action::Char('x'));
        assert!(!app.show_help);
        assert!(app.input.is_empty());
    }
}
