//! Engine module - the game state machine
//!
//! Ties together the board, the active piece and the RNG. Commands and ticks
//! mutate the state synchronously; every change is announced on an event queue
//! that collaborators (renderer, scoreboard, loggers) drain.
//!
//! The engine is not internally synchronized. Exactly one owner drives it:
//! the terminal main loop, or the async driver task.

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::shape::{random_shape, Tetromino};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{EngineEvent, GameAction, GamePhase, BOARD_COLS};

/// The falling piece: a shape anchored at its bounding-box top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub tetromino: Tetromino,
    pub row: i8,
    pub col: i8,
}

impl ActivePiece {
    /// Place a shape at the spawn anchor: row 0, bounding box centered.
    pub fn spawn(tetromino: Tetromino) -> Self {
        let col = (BOARD_COLS / 2) as i8 - (tetromino.mask.cols() / 2) as i8;
        Self { tetromino, row: 0, col }
    }

    /// Whether this piece fits on `board` where it is
    pub fn fits(&self, board: &Board) -> bool {
        board.is_valid_position(self.row, self.col, &self.tetromino.mask)
    }

    /// Copy shifted by `(dr, dc)`, or `None` if the anchor would overflow
    fn shifted(&self, dr: i8, dc: i8) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(dr)?,
            col: self.col.checked_add(dc)?,
            ..*self
        })
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.tetromino
            .mask
            .filled_cells()
            .into_iter()
            .map(move |(dr, dc)| (self.row + dr, self.col + dc))
    }
}

/// What a single `tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened.
    Skipped,
    /// The active piece descended one row.
    Fell,
    /// The piece locked, rows were cleared, and a new piece spawned.
    Locked { lines_cleared: u32 },
    /// The piece locked and the next spawn was blocked.
    GameOver { lines_cleared: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    active: Option<ActivePiece>,
    phase: GamePhase,
    rng: SimpleRng,
    /// Lines cleared since the last start.
    lines_cleared: u32,
    /// Pending notifications, oldest first.
    events: Vec<EngineEvent>,
}

impl Engine {
    /// Create an idle engine with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            phase: GamePhase::Idle,
            rng: SimpleRng::new(seed),
            lines_cleared: 0,
            events: Vec::with_capacity(8),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, EngineEvent> {
        self.events.drain(..)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    fn emit(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.emit(EngineEvent::PhaseChanged(phase));
        }
    }

    /// Clear the board and begin a new game.
    ///
    /// Works from any phase; starting while paused does not resume, it resets.
    pub fn start(&mut self) {
        self.board.clear();
        self.active = None;
        self.lines_cleared = 0;
        // A restart from Running still announces the reset.
        if self.phase == GamePhase::Running {
            self.emit(EngineEvent::PhaseChanged(GamePhase::Running));
        }
        self.set_phase(GamePhase::Running);
        self.spawn_piece();
        self.emit(EngineEvent::Redraw);
    }

    /// Stop advancing. Only meaningful while running.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.set_phase(GamePhase::Paused);
        self.emit(EngineEvent::Redraw);
        true
    }

    /// Spawn a random piece at the spawn anchor. Refused unless running.
    ///
    /// If it does not fit, the game is over and no piece stays active.
    pub fn spawn_piece(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let piece = ActivePiece::spawn(random_shape(&mut self.rng));
        self.spawn(piece)
    }

    fn spawn(&mut self, piece: ActivePiece) -> bool {
        if piece.fits(&self.board) {
            self.active = Some(piece);
            true
        } else {
            self.active = None;
            self.set_phase(GamePhase::GameOver);
            false
        }
    }

    /// Try to shift the active piece; no-op without one or if the target
    /// does not fit
    fn try_shift(&mut self, dr: i8, dc: i8) -> bool {
        let Some(moved) = self.active.and_then(|p| p.shifted(dr, dc)) else {
            return false;
        };
        if !moved.fits(&self.board) {
            return false;
        }
        self.active = Some(moved);
        self.emit(EngineEvent::Redraw);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(0, 1)
    }

    /// Move down one row; false means the piece has landed (or there is none)
    pub fn move_down(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// Rotate clockwise in place; rejected if the rotated shape does not fit
    /// at the same anchor.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = ActivePiece {
            tetromino: active.tetromino.rotated(),
            ..active
        };
        if !rotated.fits(&self.board) {
            return false;
        }
        self.active = Some(rotated);
        self.emit(EngineEvent::Redraw);
        true
    }

    /// Lock the active piece, clear full rows and spawn the next piece.
    fn lock_and_respawn(&mut self) -> TickOutcome {
        if let Some(active) = self.active.take() {
            self.board
                .place_piece(active.row, active.col, &active.tetromino.mask);
        }

        let lines_cleared = self.board.clear_lines();
        if lines_cleared > 0 {
            self.lines_cleared += lines_cleared;
            self.emit(EngineEvent::LinesCleared(lines_cleared));
        }

        if self.spawn_piece() {
            TickOutcome::Locked { lines_cleared }
        } else {
            TickOutcome::GameOver { lines_cleared }
        }
    }

    /// One timed step: descend, or lock and spawn when the piece has landed.
    ///
    /// Always ends with a redraw while running.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Skipped;
        }

        let outcome = if self.move_down() {
            TickOutcome::Fell
        } else {
            self.lock_and_respawn()
        };

        self.emit(EngineEvent::Redraw);
        outcome
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => {
                self.start();
                true
            }
            GameAction::Pause => self.pause(),
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_occupancy(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.phase = self.phase;
        out.lines_cleared = self.lines_cleared;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}
