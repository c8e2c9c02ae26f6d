//! Text layout utilities.
//!
//! - [`wrap_plain`], [`wrap_styled`] - Word wrapping for the transcript and input bar
//! - [`visual_width`], [`truncate_to_width`] - Unicode-aware width helpers

mod width;
mod wrap;

pub use width::{truncate_to_width, visual_width};
pub use wrap::{wrap_plain, wrap_styled};
