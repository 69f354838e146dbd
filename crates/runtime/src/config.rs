//! Run configuration read from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::ScoringRule;

pub const ENV_SEED: &str = "TETRIS_SEED";
pub const ENV_SCORING: &str = "TETRIS_SCORING";
pub const ENV_EVENT_LOG: &str = "TETRIS_EVENT_LOG";

/// Settings shared by the terminal binary and the async driver.
///
/// Gameplay constants (board size, tick period) are not configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    pub scoring: ScoringRule,
    /// Append engine events as JSON lines here when set.
    pub event_log_path: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            scoring: ScoringRule::default(),
            event_log_path: None,
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringRule) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_event_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.event_log_path = Some(path.into());
        self
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    ///
    /// Unparseable values fall back to defaults with a warning on stderr.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = match non_empty(lookup(ENV_SEED)) {
            Some(s) => s.parse().unwrap_or_else(|_| {
                eprintln!("[Runtime] ignoring invalid {ENV_SEED}={s:?}");
                clock_seed()
            }),
            None => clock_seed(),
        };

        let scoring = match non_empty(lookup(ENV_SCORING)) {
            Some(s) => ScoringRule::from_str(&s).unwrap_or_else(|| {
                eprintln!("[Runtime] ignoring invalid {ENV_SCORING}={s:?} (expected line|clear)");
                ScoringRule::default()
            }),
            None => ScoringRule::default(),
        };

        let event_log_path = non_empty(lookup(ENV_EVENT_LOG)).map(PathBuf::from);

        Self {
            seed,
            scoring,
            event_log_path,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Seed from the wall clock when none is configured.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}
