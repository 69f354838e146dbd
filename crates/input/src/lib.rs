//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. One key
//! press is one command; there is no auto-repeat handling beyond what the
//! terminal itself sends.

pub mod map;

pub use classic_tetris_types as types;

pub use map::{handle_key_event, should_quit, toggle_action};
