//! JSON-lines log of engine events.
//!
//! One object per line:
//!
//! ```text
//! {"seq":1,"elapsed_ms":0,"event":"phase_changed","phase":"running"}
//! {"seq":2,"elapsed_ms":0,"event":"redraw"}
//! {"seq":3,"elapsed_ms":9500,"event":"lines_cleared","count":2}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::EngineEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum EventRecord {
    PhaseChanged { phase: &'static str },
    LinesCleared { count: u32 },
    Redraw,
}

impl From<&EngineEvent> for EventRecord {
    fn from(event: &EngineEvent) -> Self {
        match *event {
            EngineEvent::Redraw => EventRecord::Redraw,
            EngineEvent::LinesCleared(count) => EventRecord::LinesCleared { count },
            EngineEvent::PhaseChanged(phase) => EventRecord::PhaseChanged {
                phase: phase.as_str(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct LogLine {
    seq: u64,
    elapsed_ms: u64,
    #[serde(flatten)]
    record: EventRecord,
}

/// The log as opened from a path.
pub type FileEventLog = EventLog<BufWriter<File>>;

pub struct EventLog<W: Write> {
    out: W,
    seq: u64,
    started: Instant,
    buf: Vec<u8>,
}

impl FileEventLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Open the configured log, or report the failure and run without one.
    pub fn open_or_warn(path: Option<&Path>) -> Option<Self> {
        let path = path?;
        match Self::open(path) {
            Ok(log) => {
                eprintln!("[Runtime] event log: {}", path.display());
                Some(log)
            }
            Err(e) => {
                eprintln!("[Runtime] event log disabled: {e:#}");
                None
            }
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            started: Instant::now(),
            buf: Vec::with_capacity(128),
        }
    }

    /// Number of records written so far.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, event: &EngineEvent) -> Result<()> {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.record_at(event, elapsed_ms)
    }

    /// Write one record with an explicit timestamp.
    pub fn record_at(&mut self, event: &EngineEvent, elapsed_ms: u64) -> Result<()> {
        self.seq += 1;
        let line = LogLine {
            seq: self.seq,
            elapsed_ms,
            record: EventRecord::from(event),
        };

        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &line)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf).context("write event log")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flush event log")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GamePhase;
    use serde_json::{json, Value};

    fn lines(log: EventLog<Vec<u8>>) -> Vec<Value> {
        let bytes = log.into_inner();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn records_are_tagged_json_lines() {
        let mut log = EventLog::new(Vec::new());
        log.record_at(&EngineEvent::PhaseChanged(GamePhase::Running), 0)
            .unwrap();
        log.record_at(&EngineEvent::LinesCleared(2), 500).unwrap();
        log.record_at(&EngineEvent::Redraw, 500).unwrap();
        assert_eq!(log.seq(), 3);

        let out = lines(log);
        assert_eq!(
            out,
            vec![
                json!({"seq": 1, "elapsed_ms": 0, "event": "phase_changed", "phase": "running"}),
                json!({"seq": 2, "elapsed_ms": 500, "event": "lines_cleared", "count": 2}),
                json!({"seq": 3, "elapsed_ms": 500, "event": "redraw"}),
            ]
        );
    }

    #[test]
    fn field_order_starts_with_seq() {
        let mut log = EventLog::new(Vec::new());
        log.record_at(&EngineEvent::PhaseChanged(GamePhase::GameOver), 12)
            .unwrap();
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(
            text,
            "{\"seq\":1,\"elapsed_ms\":12,\"event\":\"phase_changed\",\"phase\":\"game_over\"}\n"
        );
    }

    #[test]
    fn open_appends_to_file() {
        let path = std::env::temp_dir().join(format!(
            "classic-tetris-event-log-{}.jsonl",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        for _ in 0..2 {
            let mut log = FileEventLog::open(&path).unwrap();
            log.record(&EngineEvent::Redraw).unwrap();
            log.flush().unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn open_or_warn_without_path_is_none() {
        assert!(FileEventLog::open_or_warn(None).is_none());
        let missing = Path::new("/nonexistent-dir/for/sure/events.jsonl");
        assert!(FileEventLog::open_or_warn(Some(missing)).is_none());
    }
}
