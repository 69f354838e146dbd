//! Fixed-period tick scheduling for a synchronous game loop.
//!
//! The clock owns no game logic. The loop asks it whether a tick is due and
//! how long it may block waiting for input. Pausing just stops re-arming;
//! a tick that already fired is never cancelled.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TickClock {
    period_ms: u64,
    next_due_ms: Option<u64>,
}

impl TickClock {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            next_due_ms: None,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Forget the schedule so the next running poll fires at once.
    ///
    /// Used on restart, where the phase may not leave Running.
    pub fn disarm(&mut self) {
        self.next_due_ms = None;
    }

    /// Returns true when the caller should tick now.
    ///
    /// While not running the clock disarms. The first poll after the game
    /// starts fires immediately; later ticks follow `period_ms` after the
    /// previous one, without catching up on missed periods.
    pub fn poll(&mut self, now_ms: u64, running: bool) -> bool {
        if !running {
            self.next_due_ms = None;
            return false;
        }
        let due = *self.next_due_ms.get_or_insert(now_ms);
        if now_ms < due {
            return false;
        }
        self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
        true
    }

    /// How long the loop may wait before the next tick; `None` when idle.
    pub fn time_until_due(&self, now_ms: u64, running: bool) -> Option<Duration> {
        if !running {
            return None;
        }
        let wait = match self.next_due_ms {
            Some(due) => due.saturating_sub(now_ms),
            None => 0,
        };
        Some(Duration::from_millis(wait))
    }
}
