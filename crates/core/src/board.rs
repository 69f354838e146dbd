//! Board module - manages the game grid
//!
//! The board is a 20x10 grid of binary-occupancy cells stored as a flat
//! row-major array. Coordinates are `(row, col)` with row 0 at the top.
//! Dimensions are fixed at compile time and never change.

use crate::shape::ShapeMask;
use crate::types::{Cell, BOARD_COLS, BOARD_ROWS};

const ROWS: usize = BOARD_ROWS as usize;
const COLS: usize = BOARD_COLS as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = ROWS * COLS;

/// Occupancy grid exported to snapshots, `[row][col]`
pub type OccupancyGrid = [[bool; COLS]; ROWS];

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Flat index for `(row, col)`, or `None` when out of bounds
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_ROWS as i8 || col < 0 || col >= BOARD_COLS as i8 {
            return None;
        }
        Some((row as usize) * COLS + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Get cell at `(row, col)`; `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`; returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and occupied
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Cell::Occupied))
    }

    /// In bounds and empty
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Check if a row is completely occupied
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        self.row(row).iter().all(|c| c.is_occupied())
    }

    /// Cells of one row, left to right; `row` must be in bounds.
    fn row(&self, row: usize) -> &[Cell] {
        let start = row * COLS;
        &self.cells[start..start + COLS]
    }

    /// Whether `mask` anchored at `(anchor_row, anchor_col)` fits.
    ///
    /// Only filled mask cells are checked: each must land inside the grid on
    /// an empty cell. Never mutates the board.
    pub fn is_valid_position(&self, anchor_row: i8, anchor_col: i8, mask: &ShapeMask) -> bool {
        mask.filled_cells().iter().all(|&(dr, dc)| {
            match (anchor_row.checked_add(dr), anchor_col.checked_add(dc)) {
                (Some(row), Some(col)) => self.is_free(row, col),
                _ => false,
            }
        })
    }

    /// Mark every filled cell of `mask` at the anchor as occupied.
    ///
    /// The caller validates the position first; cells that would fall
    /// outside the grid are skipped.
    pub fn place_piece(&mut self, anchor_row: i8, anchor_col: i8, mask: &ShapeMask) {
        for (dr, dc) in mask.filled_cells() {
            if let (Some(row), Some(col)) = (anchor_row.checked_add(dr), anchor_col.checked_add(dc)) {
                self.set(row, col, Cell::Occupied);
            }
        }
    }

    /// Remove row `row`, shift everything above it down by one and insert an
    /// empty row at the top.
    fn remove_row(&mut self, row: usize) {
        // copy_within handles the overlapping ranges
        for r in (1..=row).rev() {
            let src = (r - 1) * COLS;
            self.cells.copy_within(src..src + COLS, r * COLS);
        }
        self.cells[..COLS].fill(Cell::Empty);
    }

    /// Clear every complete row and return how many were removed.
    ///
    /// Scans bottom to top. After a removal the same index holds the row that
    /// was above it, so it is checked again before moving up.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut row = ROWS;
        while row > 0 {
            let r = row - 1;
            if self.is_row_full(r) {
                self.remove_row(r);
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Flat row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy occupancy into a `[row][col]` bool grid (no allocation).
    pub fn write_occupancy(&self, out: &mut OccupancyGrid) {
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = self.cells[r * COLS + c].is_occupied();
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
