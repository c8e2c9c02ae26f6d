//! Reusable widgets for the chatline TUI.

pub mod input_bar;
pub mod status_bar;
pub mod text_input;

pub use input_bar::{InputBar, MAX_INPUT_LINES};
pub use status_bar::{KeyHint, StatusBar};
pub use text_input::TextInputState;
