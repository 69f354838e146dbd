//! Headless autoplayer.
//!
//! Runs the engine on the async driver with no terminal UI and feeds it
//! pseudo-random commands until the game ends or the time limit passes.
//! Useful for producing event logs (`TETRIS_EVENT_LOG`) and smoke-testing.
//!
//! Usage: `headless [max_seconds]` (default 120).

use std::time::Duration;

use anyhow::Result;
use tokio::time;

use classic_tetris::core::SimpleRng;
use classic_tetris::runtime::{spawn_engine, RunConfig};
use classic_tetris::types::{EngineEvent, GameAction, GamePhase};

const MOVE_INTERVAL_MS: u64 = 120;

const MOVES: [GameAction; 4] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::MoveDown,
    GameAction::Rotate,
];

#[tokio::main]
async fn main() -> Result<()> {
    let max_secs: u64 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 120,
    };

    let config = RunConfig::from_env();
    let mut rng = SimpleRng::new(config.seed ^ 0x9e37_79b9);
    let mut handle = spawn_engine(config);
    let mut events = handle.subscribe();

    println!("[Headless] start (limit {max_secs}s)");
    handle.send(GameAction::Start).await?;

    let deadline = time::sleep(Duration::from_secs(max_secs));
    tokio::pin!(deadline);
    let mut mover = time::interval(Duration::from_millis(MOVE_INTERVAL_MS));

    loop {
        tokio::select! {
            _ = &mut deadline => {
                println!("[Headless] time limit reached");
                break;
            }
            _ = mover.tick() => {
                let action = MOVES[rng.next_range(MOVES.len() as u32) as usize];
                handle.send(action).await?;
            }
            event = events.recv() => match event {
                Ok(EngineEvent::LinesCleared(n)) => {
                    println!("[Headless] cleared {n} line(s)");
                }
                Ok(EngineEvent::PhaseChanged(GamePhase::GameOver)) => {
                    println!("[Headless] game over");
                    break;
                }
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    eprintln!("[Headless] missed {n} events");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    let frame = handle.snapshot();
    println!(
        "[Headless] final: score {} lines {} phase {}",
        frame.score,
        frame.snapshot.lines_cleared,
        frame.snapshot.phase.as_str()
    );
    handle.shutdown().await?;
    Ok(())
}
