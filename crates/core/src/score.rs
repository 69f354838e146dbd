//! Score module - the score display's model
//!
//! The engine never keeps a score. A `Scoreboard` observes engine events and
//! counts: a start resets it, each line clear adds to it.

use crate::types::{EngineEvent, GamePhase};

/// How a line-clear notification turns into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringRule {
    /// One point per row cleared.
    #[default]
    PerLine,
    /// One point per lock that cleared anything.
    PerClear,
}

impl ScoringRule {
    /// Parse from config text: `line` / `clear` (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "line" | "lines" | "per_line" => Some(ScoringRule::PerLine),
            "clear" | "clears" | "per_clear" => Some(ScoringRule::PerClear),
            _ => None,
        }
    }

    pub fn points(&self, lines: u32) -> u32 {
        match self {
            ScoringRule::PerLine => lines,
            ScoringRule::PerClear => u32::from(lines > 0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    rule: ScoringRule,
    score: u32,
}

impl Scoreboard {
    pub fn new(rule: ScoringRule) -> Self {
        Self { rule, score: 0 }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rule(&self) -> ScoringRule {
        self.rule
    }

    /// Update from one engine event. Returns true if the score changed.
    pub fn observe(&mut self, event: &EngineEvent) -> bool {
        match *event {
            EngineEvent::PhaseChanged(GamePhase::Running) => {
                let changed = self.score != 0;
                self.score = 0;
                changed
            }
            EngineEvent::LinesCleared(lines) => {
                let points = self.rule.points(lines);
                self.score = self.score.saturating_add(points);
                points > 0
            }
            _ => false,
        }
    }
}
