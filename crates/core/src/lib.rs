//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and state management. It has no
//! dependencies on terminals, networking, or async runtimes:
//!
//! - **Deterministic**: the same seed produces the same sequence of pieces
//! - **Synchronous**: every command completes or no-ops before returning
//! - **Observable**: changes are announced on an event queue, not via callbacks
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 occupancy grid with collision checks and line clearing
//! - [`shape`]: tetromino bitmasks and clockwise rotation
//! - [`engine`]: the game state machine (start, pause, moves, rotate, tick)
//! - [`rng`]: seedable LCG for uniform shape selection
//! - [`snapshot`]: read-only frame state for renderers
//! - [`score`]: scoreboard that observes line-clear events
//! - [`clock`]: fixed-period tick scheduling for a synchronous loop
//!
//! # Rules
//!
//! - Pieces spawn at row 0, bounding box centered horizontally
//! - Rotation is clockwise only and is rejected if the result does not fit
//!   (no wall kicks)
//! - A piece that cannot descend on a tick locks, full rows clear, and the
//!   next piece spawns; a blocked spawn ends the game
//! - Starting always resets the board, including from pause
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::{Engine, Scoreboard, TickOutcome};
//! use classic_tetris_types::{EngineEvent, GameAction};
//!
//! let mut engine = Engine::new(12345);
//! let mut scoreboard = Scoreboard::default();
//!
//! engine.apply_action(GameAction::Start);
//! engine.apply_action(GameAction::MoveLeft);
//! engine.apply_action(GameAction::Rotate);
//! assert_ne!(engine.tick(), TickOutcome::Skipped);
//!
//! for event in engine.drain_events() {
//!     scoreboard.observe(&event);
//! }
//! assert_eq!(scoreboard.score(), 0);
//! ```

pub mod board;
pub mod clock;
pub mod engine;
pub mod rng;
pub mod score;
pub mod shape;
pub mod snapshot;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, OccupancyGrid};
pub use clock::TickClock;
pub use engine::{ActivePiece, Engine, TickOutcome};
pub use rng::SimpleRng;
pub use score::{Scoreboard, ScoringRule};
pub use shape::{random_shape, rotate_clockwise, template_mask, ShapeMask, Tetromino};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
