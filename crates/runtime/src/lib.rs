//! Runtime glue around the engine.
//!
//! - [`config`]: `RunConfig` read from `TETRIS_*` environment variables
//! - [`event_log`]: JSON-lines log of engine events
//! - [`driver`]: the engine as a single-owner tokio task
//!
//! Diagnostics go to stderr prefixed with `[Runtime]`; stdout belongs to the
//! terminal frontend.

pub mod config;
pub mod driver;
pub mod event_log;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use config::RunConfig;
pub use driver::{spawn_engine, DriverError, EngineHandle, Frame};
pub use event_log::{EventLog, FileEventLog};
