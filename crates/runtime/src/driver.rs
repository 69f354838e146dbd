//! Async engine driver.
//!
//! One tokio task owns the [`Engine`]. Commands arrive over an mpsc channel
//! and ticks come from a 500ms interval that is only polled while the game is
//! running, so a tick can never overlap a command.
//!
//! After every step the drained events go to three places: the scoreboard,
//! the optional JSON-lines log, and a broadcast channel for subscribers. The
//! latest [`Frame`] is published on a watch channel.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::config::RunConfig;
use crate::core::{Engine, GameSnapshot, Scoreboard};
use crate::event_log::FileEventLog;
use crate::types::{EngineEvent, GameAction, TICK_MS};

const COMMAND_CAPACITY: usize = 64;
const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("engine driver is closed")]
    Closed,
    #[error("engine driver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// What a frontend needs to draw: engine state plus the observed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub snapshot: GameSnapshot,
    pub score: u32,
}

#[derive(Debug)]
enum Command {
    Action(GameAction),
    Shutdown,
}

/// Handle to a running driver task.
pub struct EngineHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<EngineEvent>,
    frames: watch::Receiver<Frame>,
    task: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Queue a command. Commands are applied in the order they are sent.
    pub async fn send(&self, action: GameAction) -> Result<(), DriverError> {
        self.commands
            .send(Command::Action(action))
            .await
            .map_err(|_| DriverError::Closed)
    }

    /// Receive every engine event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Latest published frame.
    pub fn snapshot(&self) -> Frame {
        *self.frames.borrow()
    }

    /// A watch receiver for awaiting frame changes.
    pub fn frames(&self) -> watch::Receiver<Frame> {
        self.frames.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Stop the driver and wait for its task to finish.
    ///
    /// Calling it again after a successful shutdown is a no-op.
    pub async fn shutdown(&mut self) -> Result<(), DriverError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        // The task may already be gone; joining still reports how it ended.
        let _ = self.commands.send(Command::Shutdown).await;
        task.await?;
        Ok(())
    }
}

/// Move a fresh engine into its own task. Must be called inside a tokio
/// runtime.
pub fn spawn_engine(config: RunConfig) -> EngineHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CAPACITY);
    let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
    let (frame_tx, frame_rx) = watch::channel(Frame::default());

    let log = FileEventLog::open_or_warn(config.event_log_path.as_deref());
    let driver = Driver {
        engine: Engine::new(config.seed),
        scoreboard: Scoreboard::new(config.scoring),
        log,
        events: event_tx.clone(),
        frames: frame_tx,
    };

    eprintln!(
        "[Runtime] engine driver started (seed {}, scoring {:?})",
        config.seed, config.scoring
    );
    let task = tokio::spawn(driver.run(cmd_rx));

    EngineHandle {
        commands: cmd_tx,
        events: event_tx,
        frames: frame_rx,
        task: Some(task),
    }
}

struct Driver {
    engine: Engine,
    scoreboard: Scoreboard,
    log: Option<FileEventLog>,
    events: broadcast::Sender<EngineEvent>,
    frames: watch::Sender<Frame>,
}

impl Driver {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut ticker = time::interval(Duration::from_millis(u64::from(TICK_MS)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(Command::Action(action)) => {
                        self.engine.apply_action(action);
                        if action == GameAction::Start && self.engine.is_running() {
                            // First descent happens right away, then every period.
                            ticker.reset_immediately();
                        }
                    }
                    Some(Command::Shutdown) | None => break,
                },
                _ = ticker.tick(), if self.engine.is_running() => {
                    self.engine.tick();
                }
            }
            self.publish();
        }

        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.flush() {
                eprintln!("[Runtime] event log flush failed: {e:#}");
            }
        }
        eprintln!(
            "[Runtime] engine driver stopped (score {}, lines {})",
            self.scoreboard.score(),
            self.engine.lines_cleared()
        );
    }

    fn publish(&mut self) {
        if !self.engine.has_pending_events() {
            return;
        }

        let events: Vec<EngineEvent> = self.engine.drain_events().collect();
        for event in &events {
            self.scoreboard.observe(event);
            self.write_log(event);
            // No subscribers is fine.
            let _ = self.events.send(*event);
        }

        self.frames.send_replace(Frame {
            snapshot: self.engine.snapshot(),
            score: self.scoreboard.score(),
        });
    }

    fn write_log(&mut self, event: &EngineEvent) {
        let Some(log) = self.log.as_mut() else {
            return;
        };
        let result = match event {
            EngineEvent::PhaseChanged(_) | EngineEvent::LinesCleared(_) => {
                log.record(event).and_then(|()| log.flush())
            }
            EngineEvent::Redraw => log.record(event),
        };
        if let Err(e) = result {
            eprintln!("[Runtime] event log disabled: {e:#}");
            self.log = None;
        }
    }
}
