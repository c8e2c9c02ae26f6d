//! Multi-line text input state.

use crate::text::wrap_plain;

/// Glyph drawn at the cursor position.
pub const CURSOR: char = '█';

/// State for a text input, managing content and cursor position.
///
/// The cursor is a character index, so multi-byte input (accents, `¿`, `ñ`)
/// is handled safely.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    content: String,
    cursor: usize,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// True when the content is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Replace the content and move the cursor to the end.
    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_len();
    }

    /// Take the content, clearing the state.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.content.insert(idx, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let idx = self.byte_index(self.cursor);
        self.content.insert_str(idx, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Content wrapped to `width`, with the cursor glyph inserted if requested.
    ///
    /// Returns the visual lines and the index of the line holding the cursor.
    pub fn visual_lines(&self, width: usize, show_cursor: bool) -> (Vec<String>, usize) {
        let display = if show_cursor {
            let mut display = self.content.clone();
            display.insert(self.byte_index(self.cursor), CURSOR);
            display
        } else {
            self.content.clone()
        };

        let lines = wrap_plain(&display, width);
        let cursor_line = if show_cursor {
            lines
                .iter()
                .position(|line| line.contains(CURSOR))
                .unwrap_or(0)
        } else {
            0
        };
        (lines, cursor_line)
    }

    /// Number of visual lines at `width`, between 1 and `max_lines`.
    pub fn visual_height(&self, width: usize, max_lines: usize) -> usize {
        let (lines, _) = self.visual_lines(width, true);
        lines.len().clamp(1, max_lines.max(1))
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(idx, _)| idx)
    }
}
