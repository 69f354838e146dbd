//! Terminal Tetris runner (default binary).
//!
//! Single-threaded loop: the main thread owns the engine, polls crossterm for
//! input with a timeout until the next tick, and repaints only after the
//! engine reports a change.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use classic_tetris::core::{Engine, GameSnapshot, Scoreboard, TickClock};
use classic_tetris::input::{handle_key_event, should_quit};
use classic_tetris::runtime::{FileEventLog, RunConfig};
use classic_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use classic_tetris::types::{GameAction, TICK_MS};

/// Input poll timeout while nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = RunConfig::from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let mut engine = Engine::new(config.seed);
    let mut scoreboard = Scoreboard::new(config.scoring);
    let mut log = FileEventLog::open_or_warn(config.event_log_path.as_deref());
    let mut clock = TickClock::new(u64::from(TICK_MS));

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;
    let mut dirty = true;

    loop {
        if clock.poll(now_ms(), engine.is_running()) {
            engine.tick();
        }

        for event in engine.drain_events() {
            scoreboard.observe(&event);
            if let Some(l) = log.as_mut() {
                if let Err(e) = l.record(&event) {
                    eprintln!("[Runtime] event log disabled: {e:#}");
                    log = None;
                }
            }
            dirty = true;
        }

        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, scoreboard.score(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let timeout = clock
            .time_until_due(now_ms(), engine.is_running())
            .unwrap_or(IDLE_POLL);

        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    break;
                }
                if let Some(action) = handle_key_event(key, engine.phase()) {
                    if action == GameAction::Start {
                        clock.disarm();
                    }
                    engine.apply_action(action);
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }

    if let Some(l) = log.as_mut() {
        l.flush()?;
    }
    Ok(())
}
