//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so the engine,
//! the terminal shell and the async runtime can all share it.
//!
//! # Board Dimensions
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//!
//! Coordinates are `(row, col)` pairs of `i8` so that out-of-bounds anchors can
//! be expressed and rejected instead of wrapping.
//!
//! # Timing
//!
//! The game advances on a fixed 500ms tick while running. The period never
//! changes with score or lines.
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{GamePhase, ShapeKind, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(ShapeKind::ALL.len(), 7);
//! assert_eq!(GamePhase::Running.as_str(), "running");
//! assert_eq!((BOARD_ROWS, BOARD_COLS), (20, 10));
//! ```

/// Board height in cells (20 rows)
pub const BOARD_ROWS: u8 = 20;

/// Board width in cells (10 columns)
pub const BOARD_COLS: u8 = 10;

/// Fixed tick period in milliseconds
pub const TICK_MS: u32 = 500;

/// Largest bounding box any shape mask may occupy (4x4)
pub const MAX_SHAPE_DIM: usize = 4;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven tetromino kinds
///
/// Each kind has a fixed display color:
/// - **I**: cyan
/// - **O**: yellow
/// - **T**: magenta
/// - **L**: red
/// - **J**: blue
/// - **S**: green
/// - **Z**: orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// Catalog order, used for uniform random selection.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Display color of this kind
    pub const fn color(&self) -> Rgb {
        match self {
            ShapeKind::I => Rgb::new(0, 255, 255),
            ShapeKind::O => Rgb::new(255, 255, 0),
            ShapeKind::T => Rgb::new(255, 0, 255),
            ShapeKind::L => Rgb::new(255, 0, 0),
            ShapeKind::J => Rgb::new(0, 0, 255),
            ShapeKind::S => Rgb::new(0, 255, 0),
            ShapeKind::Z => Rgb::new(255, 165, 0),
        }
    }
}

/// A cell on the board. Locked cells carry no color, only occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied,
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied)
    }
}

/// Lifecycle phase of a game
///
/// `Idle -> Running -> Paused`, `Running -> GameOver`. Starting from any
/// phase resets the board and enters `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Commands accepted by the engine
///
/// Used by keyboard input, the async driver and scripted players alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Reset the board and begin a new game
    Start,
    /// Stop advancing; only `Start` leaves this state
    Pause,
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Shift the active piece one row down
    MoveDown,
    /// Rotate the active piece 90° clockwise
    Rotate,
}

/// Notification pushed by the engine for its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineEvent {
    /// Visible state changed; repaint.
    Redraw,
    /// One lock cleared this many rows (always > 0).
    LinesCleared(u32),
    /// The game moved to a new phase.
    PhaseChanged(GamePhase),
}
