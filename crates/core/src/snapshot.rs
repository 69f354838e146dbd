use crate::board::OccupancyGrid;
use crate::engine::ActivePiece;
use crate::shape::ShapeMask;
use crate::types::{GamePhase, Rgb, ShapeKind, BOARD_COLS, BOARD_ROWS};

/// Read-only view of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub mask: ShapeMask,
    pub color: Rgb,
    pub row: i8,
    pub col: i8,
}

impl ActiveSnapshot {
    /// Board coordinates `(row, col)` of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.mask
            .filled_cells()
            .into_iter()
            .map(move |(dr, dc)| (self.row + dr, self.col + dc))
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.tetromino.kind,
            mask: value.tetromino.mask,
            color: value.tetromino.color,
            row: value.row,
            col: value.col,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: OccupancyGrid,
    pub active: Option<ActiveSnapshot>,
    pub phase: GamePhase,
    pub lines_cleared: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[false; BOARD_COLS as usize]; BOARD_ROWS as usize];
        self.active = None;
        self.phase = GamePhase::Idle;
        self.lines_cleared = 0;
    }

    pub fn running(&self) -> bool {
        self.phase.is_running()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[false; BOARD_COLS as usize]; BOARD_ROWS as usize],
            active: None,
            phase: GamePhase::Idle,
            lines_cleared: 0,
        }
    }
}
