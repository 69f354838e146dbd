//! Shape module - tetromino bitmasks and clockwise rotation
//!
//! A shape is a small boolean matrix (at most 4x4) whose filled cells are the
//! minos of the piece. Templates are constant data; rotation always builds a
//! new mask and never touches the source.

use std::fmt;

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{Rgb, ShapeKind, MAX_SHAPE_DIM};

/// Offset of a filled cell inside a mask, as `(row, col)`
pub type MaskOffset = (i8, i8);

/// Immutable 2D bitmask with a `rows x cols` bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMask {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl ShapeMask {
    /// Build a mask from `0/1` pattern rows. Only the top-left `rows x cols`
    /// part of `pattern` is read.
    const fn from_pattern(rows: u8, cols: u8, pattern: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < rows as usize {
            let mut c = 0;
            while c < cols as usize {
                bits[r][c] = pattern[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, bits }
    }

    /// Build a mask from rows of `0/1` values (non-zero = filled).
    ///
    /// Returns `None` for an empty mask, ragged rows, or a bounding box larger
    /// than 4x4.
    ///
    /// ```
    /// use classic_tetris_core::ShapeMask;
    ///
    /// let t = ShapeMask::from_rows(&[&[0, 1, 0], &[1, 1, 1]]).unwrap();
    /// assert_eq!((t.rows(), t.cols()), (2, 3));
    /// assert!(ShapeMask::from_rows(&[&[1, 1], &[1]]).is_none());
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height == 0 || width == 0 || height > MAX_SHAPE_DIM || width > MAX_SHAPE_DIM {
            return None;
        }

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return None;
            }
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = v != 0;
            }
        }
        if !bits.iter().flatten().any(|&b| b) {
            return None;
        }

        Some(Self {
            rows: height as u8,
            cols: width as u8,
            bits,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether `(r, c)` is a filled cell. Outside the bounding box is empty.
    pub fn is_filled(&self, r: usize, c: usize) -> bool {
        r < self.rows as usize && c < self.cols as usize && self.bits[r][c]
    }

    /// Offsets of every filled cell, row-major.
    pub fn filled_cells(&self) -> ArrayVec<MaskOffset, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }> {
        let mut out = ArrayVec::new();
        for r in 0..self.rows as usize {
            for c in 0..self.cols as usize {
                if self.bits[r][c] {
                    out.push((r as i8, c as i8));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: an `R x C` mask becomes `C x R` with
    /// `result[c][R-1-r] = source[r][c]`.
    pub fn rotate_clockwise(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..rows {
            for c in 0..cols {
                bits[c][rows - 1 - r] = self.bits[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

impl fmt::Display for ShapeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows as usize {
            for c in 0..self.cols as usize {
                write!(f, "{}", if self.bits[r][c] { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Pure clockwise rotation of a mask.
pub fn rotate_clockwise(mask: &ShapeMask) -> ShapeMask {
    mask.rotate_clockwise()
}

const I_MASK: ShapeMask = ShapeMask::from_pattern(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_MASK: ShapeMask = ShapeMask::from_pattern(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_MASK: ShapeMask = ShapeMask::from_pattern(2, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const L_MASK: ShapeMask =
    ShapeMask::from_pattern(3, 2, [[1, 0, 0, 0], [1, 0, 0, 0], [1, 1, 0, 0], [0; 4]]);
const J_MASK: ShapeMask =
    ShapeMask::from_pattern(3, 2, [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0; 4]]);
const S_MASK: ShapeMask = ShapeMask::from_pattern(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_MASK: ShapeMask = ShapeMask::from_pattern(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);

/// Spawn-orientation template mask for a kind
pub fn template_mask(kind: ShapeKind) -> ShapeMask {
    match kind {
        ShapeKind::I => I_MASK,
        ShapeKind::O => O_MASK,
        ShapeKind::T => T_MASK,
        ShapeKind::L => L_MASK,
        ShapeKind::J => J_MASK,
        ShapeKind::S => S_MASK,
        ShapeKind::Z => Z_MASK,
    }
}

/// A shape in some orientation plus its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: ShapeKind,
    pub mask: ShapeMask,
    pub color: Rgb,
}

impl Tetromino {
    /// Catalog template for a kind, in spawn orientation
    pub fn template(kind: ShapeKind) -> Self {
        Self {
            kind,
            mask: template_mask(kind),
            color: kind.color(),
        }
    }

    /// Same piece rotated clockwise; kind and color are kept
    pub fn rotated(&self) -> Self {
        Self {
            mask: self.mask.rotate_clockwise(),
            ..*self
        }
    }
}

/// Pick one of the seven templates uniformly at random.
pub fn random_shape(rng: &mut SimpleRng) -> Tetromino {
    let idx = rng.next_range(ShapeKind::ALL.len() as u32) as usize;
    Tetromino::template(ShapeKind::ALL[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_four_cells() {
        for kind in ShapeKind::ALL {
            assert_eq!(template_mask(kind).filled_cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn rotate_t_swaps_dimensions() {
        let t = template_mask(ShapeKind::T);
        let r = t.rotate_clockwise();
        assert_eq!((r.rows(), r.cols()), (3, 2));
        // 010/111 -> 10/11/10
        let expected = ShapeMask::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]).unwrap();
        assert_eq!(r, expected);
    }

    #[test]
    fn rotate_i_becomes_vertical() {
        let r = template_mask(ShapeKind::I).rotate_clockwise();
        assert_eq!((r.rows(), r.cols()), (4, 1));
        assert_eq!(r.filled_cells().as_slice(), &[(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in ShapeKind::ALL {
            let m = template_mask(kind);
            let back = m
                .rotate_clockwise()
                .rotate_clockwise()
                .rotate_clockwise()
                .rotate_clockwise();
            assert_eq!(back, m, "{:?}", kind);
        }
    }

    #[test]
    fn rotation_does_not_touch_source() {
        let t = Tetromino::template(ShapeKind::L);
        let r = t.rotated();
        assert_eq!(t.mask, template_mask(ShapeKind::L));
        assert_ne!(r.mask, t.mask);
        assert_eq!(r.color, t.color);
        assert_eq!(r.kind, ShapeKind::L);
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        assert!(ShapeMask::from_rows(&[]).is_none());
        assert!(ShapeMask::from_rows(&[&[]]).is_none());
        assert!(ShapeMask::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
        assert!(ShapeMask::from_rows(&[&[1], &[1], &[1], &[1], &[1]]).is_none());
    }

    #[test]
    fn display_draws_mask() {
        assert_eq!(template_mask(ShapeKind::S).to_string(), ".##\n##.\n");
    }

    #[test]
    fn random_shape_covers_catalog() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let t = random_shape(&mut rng);
            let idx = ShapeKind::ALL.iter().position(|k| *k == t.kind).unwrap();
            seen[idx] = true;
            assert_eq!(t.mask, template_mask(t.kind));
        }
        assert!(seen.iter().all(|s| *s));
    }
}
