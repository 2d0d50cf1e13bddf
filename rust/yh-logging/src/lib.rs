//! yh-logging: NDJSON game events.
//!
//! Append-only, one JSON object per line, for post-mortems and for the score-history
//! collaborator (which consumes `game_over`). The session core never writes on its own;
//! the embedding loop drains events and hands them to an [`NdjsonWriter`].

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use yh_core::Category;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event schema version.
pub const EVENT_SCHEMA: u32 = 1;

/// Rules variant recorded with every event.
pub const RULESET_ID: &str = "yahtzee_joker_v1";

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// Log schema versioning fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfoV1 {
    pub event_schema: u32,
    pub ruleset_id: String,
}

impl Default for VersionInfoV1 {
    fn default() -> Self {
        Self {
            event_schema: EVENT_SCHEMA,
            ruleset_id: RULESET_ID.to_string(),
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    TurnStart {
        player: usize,
        name: String,
        round: u8,
    },
    Roll {
        player: usize,
        round: u8,
        /// 1..=3
        roll: u8,
        dice: [u8; 5],
    },
    Hold {
        player: usize,
        held: Vec<usize>,
    },
    Score {
        player: usize,
        round: u8,
        category: Category,
        score: u16,
        yahtzee_bonus: bool,
    },
    Undo {
        player: usize,
        rolls_used: u8,
    },
    Reset {
        players: usize,
    },
    GameOver {
        grand_totals: Vec<u32>,
    },
    Fault {
        message: String,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::TurnStart { .. } => "turn_start",
            GameEvent::Roll { .. } => "roll",
            GameEvent::Hold { .. } => "hold",
            GameEvent::Score { .. } => "score",
            GameEvent::Undo { .. } => "undo",
            GameEvent::Reset { .. } => "reset",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::Fault { .. } => "fault",
        }
    }
}

/// One log line: timestamp, schema info, then the event's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecordV1 {
    pub ts_ms: u64,
    pub v: VersionInfoV1,
    #[serde(flatten)]
    pub event: GameEvent,
}

impl EventRecordV1 {
    /// Stamp `event` with the current time.
    pub fn now(event: GameEvent) -> Self {
        Self {
            ts_ms: now_ms(),
            v: VersionInfoV1::default(),
            event,
        }
    }
}

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("ndjson io: {0}")]
    Io(#[from] io::Error),
    #[error("ndjson json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    /// Write every record in order.
    pub fn write_all<'a, I>(&mut self, records: I) -> Result<(), NdjsonError>
    where
        I: IntoIterator<Item = &'a EventRecordV1>,
    {
        for r in records {
            self.write_event(r)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

/// Every parseable JSON line. Blank lines and a torn trailing line are skipped.
pub fn read_ndjson_lenient(path: impl AsRef<Path>) -> Result<Vec<Value>, NdjsonError> {
    let s = std::fs::read_to_string(path)?;
    Ok(s.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .collect())
}

/// Like [`read_ndjson_lenient`], keeping only lines that are game event records.
pub fn read_events_lenient(path: impl AsRef<Path>) -> Result<Vec<EventRecordV1>, NdjsonError> {
    Ok(read_ndjson_lenient(path)?
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}
