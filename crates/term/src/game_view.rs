//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure: no I/O, so every frame can be checked in unit tests.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, ScreenCell};
use crate::types::{GamePhase, Rgb, BOARD_COLS, BOARD_ROWS};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const LOCKED_FG: Rgb = Rgb::new(170, 170, 180);

const EMPTY_GLYPH: char = '·';
const BLOCK_GLYPH: char = '█';

const PANEL_MIN_WIDTH: u16 = 12;

const HELP_LINES: [&str; 5] = [
    "←/→  move",
    "↓    drop",
    "↑    rotate",
    "ENT  start/pause",
    "q    quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Vertical placement of the playfield inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the bordered playfield lands for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the border.
    pub x: u16,
    pub y: u16,
    /// Border size including both edges.
    pub frame_w: u16,
    pub frame_h: u16,
}

/// Largest number of terminal columns or rows one board cell may span.
pub const MAX_CELL_SIZE: u16 = 8;

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    /// Cell size is clamped to `1..=MAX_CELL_SIZE` on both axes.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_SIZE),
            cell_h: cell_h.clamp(1, MAX_CELL_SIZE),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cell_w, self.cell_h)
    }

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let frame_w = u16::from(BOARD_COLS) * self.cell_w + 2;
        let frame_h = u16::from(BOARD_ROWS) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            x,
            y,
            frame_w,
            frame_h,
        }
    }

    /// Render one frame into an existing framebuffer, resizing it to the
    /// viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        score: u32,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(ScreenCell::default());

        let layout = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        draw_border(fb, layout, border);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        let locked = CellStyle::new(LOCKED_FG, PLAYFIELD_BG);
        for (row, cells) in snap.board.iter().enumerate() {
            for (col, &occupied) in cells.iter().enumerate() {
                let (ch, style) = if occupied {
                    (BLOCK_GLYPH, locked)
                } else {
                    (EMPTY_GLYPH, empty)
                };
                self.fill_board_cell(fb, layout, row as u16, col as u16, ch, style);
            }
        }

        if let Some(active) = snap.active {
            let style = CellStyle::new(active.color, PLAYFIELD_BG).bold();
            for (row, col) in active.cells() {
                if (0..BOARD_ROWS as i8).contains(&row) && (0..BOARD_COLS as i8).contains(&col) {
                    self.fill_board_cell(fb, layout, row as u16, col as u16, BLOCK_GLYPH, style);
                }
            }
        }

        draw_side_panel(fb, snap, score, viewport, layout);

        match snap.phase {
            GamePhase::Idle => draw_overlay_text(fb, layout, "PRESS ENTER"),
            GamePhase::Paused => draw_overlay_text(fb, layout, "PAUSED"),
            GamePhase::GameOver => draw_overlay_text(fb, layout, "GAME OVER"),
            GamePhase::Running => {}
        }
    }

    /// Render into a freshly allocated framebuffer.
    pub fn render(&self, snap: &GameSnapshot, score: u32, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, score, viewport, &mut fb);
        fb
    }

    /// Terminal position of the top-left character of a board cell.
    pub fn cell_origin(&self, layout: BoardLayout, row: u16, col: u16) -> (u16, u16) {
        (
            layout
                .x
                .saturating_add(1)
                .saturating_add(col.saturating_mul(self.cell_w)),
            layout
                .y
                .saturating_add(1)
                .saturating_add(row.saturating_mul(self.cell_h)),
        )
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        row: u16,
        col: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_origin(layout, row, col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: BoardLayout, style: CellStyle) {
    let BoardLayout {
        x,
        y,
        frame_w: w,
        frame_h: h,
    } = layout;

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_side_panel(
    fb: &mut FrameBuffer,
    snap: &GameSnapshot,
    score: u32,
    viewport: Viewport,
    layout: BoardLayout,
) {
    let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
    if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
        return;
    }

    let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
    let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
    let help = value.dim();

    let mut y = layout.y;
    fb.put_str(panel_x, y, "SCORE", label);
    fb.put_u32(panel_x, y + 1, score, value);
    y += 3;

    fb.put_str(panel_x, y, "LINES", label);
    fb.put_u32(panel_x, y + 1, snap.lines_cleared, value);
    y += 3;

    fb.put_str(panel_x, y, "STATE", label);
    fb.put_str(panel_x, y + 1, phase_label(snap.phase), value);
    y += 3;

    for line in HELP_LINES {
        if y >= viewport.height {
            break;
        }
        fb.put_str(panel_x, y, line, help);
        y += 1;
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: BoardLayout, text: &str) {
    let mid_y = layout.y.saturating_add(layout.frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = layout
        .x
        .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    fb.put_str(x, mid_y, text, style);
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Idle => "READY",
        GamePhase::Running => "PLAYING",
        GamePhase::Paused => "PAUSED",
        GamePhase::GameOver => "GAME OVER",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Engine;

    fn viewport() -> Viewport {
        Viewport::new(60, 24)
    }

    #[test]
    fn layout_centers_board() {
        let view = GameView::default();
        let layout = view.layout(viewport());
        assert_eq!(layout.frame_w, 22);
        assert_eq!(layout.frame_h, 22);
        assert_eq!(layout.x, (60 - 22) / 2);
        assert_eq!(layout.y, 1);

        let top = GameView::default().with_anchor_y(AnchorY::Top);
        assert_eq!(top.layout(viewport()).y, 0);
    }

    #[test]
    fn empty_board_draws_grid_dots_and_border() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), 0, viewport());
        let layout = view.layout(viewport());

        assert_eq!(fb.get(layout.x, layout.y).map(|c| c.ch), Some('┌'));
        let (px, py) = view.cell_origin(layout, 19, 9);
        assert_eq!(fb.get(px, py).map(|c| c.ch), Some(EMPTY_GLYPH));
        assert_eq!(fb.get(px + 1, py).map(|c| c.ch), Some(EMPTY_GLYPH));
    }

    #[test]
    fn locked_cells_share_one_color() {
        let mut snap = GameSnapshot::default();
        snap.phase = GamePhase::Running;
        snap.board[19][0] = true;
        snap.board[19][9] = true;

        let view = GameView::default();
        let layout = view.layout(viewport());
        let fb = view.render(&snap, 0, viewport());

        let (ax, ay) = view.cell_origin(layout, 19, 0);
        let (bx, by) = view.cell_origin(layout, 19, 9);
        let a = fb.get(ax, ay).unwrap();
        let b = fb.get(bx, by).unwrap();
        assert_eq!(a.ch, BLOCK_GLYPH);
        assert_eq!(a.style.fg, LOCKED_FG);
        assert_eq!(a, b);
    }

    #[test]
    fn active_piece_uses_its_color() {
        let mut engine = Engine::new(3);
        engine.start();
        let snap = engine.snapshot();
        let active = snap.active.unwrap();

        let view = GameView::default();
        let layout = view.layout(viewport());
        let fb = view.render(&snap, 0, viewport());

        for (row, col) in active.cells() {
            let (px, py) = view.cell_origin(layout, row as u16, col as u16);
            let cell = fb.get(px, py).unwrap();
            assert_eq!(cell.ch, BLOCK_GLYPH);
            assert_eq!(cell.style.fg, active.color);
        }
    }

    #[test]
    fn overlays_follow_phase() {
        let view = GameView::default();
        let layout = view.layout(viewport());
        let mid = layout.y + layout.frame_h / 2;

        let mut snap = GameSnapshot::default();
        let fb = view.render(&snap, 0, viewport());
        assert!(fb.row_text(mid).contains("PRESS ENTER"));

        snap.phase = GamePhase::Paused;
        let fb = view.render(&snap, 0, viewport());
        assert!(fb.row_text(mid).contains("PAUSED"));

        snap.phase = GamePhase::GameOver;
        let fb = view.render(&snap, 0, viewport());
        assert!(fb.row_text(mid).contains("GAME OVER"));

        snap.phase = GamePhase::Running;
        let fb = view.render(&snap, 0, viewport());
        assert!(!fb.row_text(mid).contains("PAUSED"));
    }

    #[test]
    fn side_panel_shows_score_and_lines() {
        let mut snap = GameSnapshot::default();
        snap.lines_cleared = 7;
        let view = GameView::default();
        let layout = view.layout(viewport());
        let fb = view.render(&snap, 1234, viewport());

        assert!(fb.row_text(layout.y).contains("SCORE"));
        assert!(fb.row_text(layout.y + 1).contains("1234"));
        assert!(fb.row_text(layout.y + 3).contains("LINES"));
        assert!(fb.row_text(layout.y + 4).contains('7'));
        assert!(fb.row_text(layout.y + 7).contains("READY"));
    }

    #[test]
    fn narrow_viewport_skips_side_panel() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), 99, Viewport::new(24, 24));
        assert!((0..24).all(|y| !fb.row_text(y).contains("SCORE")));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::new(3, 2);
        let mut engine = Engine::new(1);
        engine.start();
        let fb = view.render(&engine.snapshot(), 0, Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }

    #[test]
    fn oversized_cells_are_clamped() {
        let view = GameView::new(u16::MAX, u16::MAX);
        assert_eq!(view.cell_size(), (MAX_CELL_SIZE, MAX_CELL_SIZE));
        assert_eq!(GameView::new(0, 0).cell_size(), (1, 1));

        let layout = view.layout(Viewport::new(u16::MAX, u16::MAX));
        assert_eq!(layout.frame_w, 10 * MAX_CELL_SIZE + 2);
        assert_eq!(layout.frame_h, 20 * MAX_CELL_SIZE + 2);
        let (px, py) = view.cell_origin(layout, 19, 9);
        assert_eq!(px, layout.x + 1 + 9 * MAX_CELL_SIZE);
        assert_eq!(py, layout.y + 1 + 19 * MAX_CELL_SIZE);

        let mut engine = Engine::new(1);
        engine.start();
        let fb = view.render(&engine.snapshot(), 0, Viewport::new(40, 20));
        assert_eq!((fb.width(), fb.height()), (40, 20));
    }
}
