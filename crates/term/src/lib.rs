//! Terminal rendering for the game.
//!
//! A small game-oriented renderer: the view paints a [`GameSnapshot`] into a
//! framebuffer of styled cells, and [`TerminalRenderer`] flushes that buffer
//! through `crossterm`, diffing against the previous frame.
//!
//! [`GameSnapshot`]: crate::core::GameSnapshot

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, ScreenCell};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport, MAX_CELL_SIZE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
