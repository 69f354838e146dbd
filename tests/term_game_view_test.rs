use classic_tetris::core::{Engine, GameSnapshot};
use classic_tetris::term::{AnchorY, GameView, Viewport};
use classic_tetris::types::GamePhase;

#[test]
fn term_view_renders_border_corners() {
    let snap = Engine::new(1).snapshot();
    let view = GameView::default();

    // cell_w=2, cell_h=1: 20x20 board pixels, 22x22 with the border.
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, 0, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.phase = GamePhase::Running;
    snap.board[19][0] = true;

    let view = GameView::default();
    let fb = view.render(&snap, 0, Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_custom_cell_size() {
    let mut snap = GameSnapshot::default();
    snap.phase = GamePhase::Running;
    snap.board[0][0] = true;

    let view = GameView::new(3, 2).with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(32, 42);
    let fb = view.render(&snap, 0, vp);

    for dy in 0..2 {
        for dx in 0..3 {
            assert_eq!(fb.get(1 + dx, 1 + dy).unwrap().ch, '█');
        }
    }
    assert_eq!(fb.get(4, 1).unwrap().ch, '·');
    assert_eq!(fb.get(31, 41).unwrap().ch, '┘');
}

#[test]
fn term_view_running_game_shows_active_piece() {
    let mut engine = Engine::new(8);
    engine.start();
    let snap = engine.snapshot();
    let active = snap.active.unwrap();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, 0, Viewport::new(22, 22));
    for (row, col) in active.cells() {
        let cell = fb.get(1 + col as u16 * 2, 1 + row as u16).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, active.color);
    }
}
