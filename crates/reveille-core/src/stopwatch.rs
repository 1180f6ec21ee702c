//! Wall-clock stopwatch with lap capture.
//!
//! The stopwatch holds no timer thread: it records the epoch instant it
//! was started at and derives elapsed time on demand, so it survives
//! serialization and process restarts. Elapsed time wraps at 24 hours.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::Database;

/// The kv slot holding the serialized stopwatch.
pub const STOPWATCH_KEY: &str = "stopwatch";

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StopwatchState {
    #[default]
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stopwatch {
    state: StopwatchState,
    /// Time banked across previous run segments, in milliseconds.
    accumulated_ms: u64,
    /// Epoch millis of the current segment's start; present iff running.
    started_epoch_ms: Option<u64>,
    laps: Vec<u64>,
}

fn now_ms() -> u64 {
    // Epoch millis; the timestamp is non-negative for any plausible clock.
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    pub fn start(&mut self) {
        self.start_at(now_ms());
    }

    /// Start or resume. A no-op while already running.
    pub fn start_at(&mut self, now_ms: u64) {
        if self.state == StopwatchState::Running {
            return;
        }
        self.state = StopwatchState::Running;
        self.started_epoch_ms = Some(now_ms);
    }

    pub fn stop(&mut self) {
        self.stop_at(now_ms());
    }

    /// Pause, banking the current segment. A no-op unless running.
    pub fn stop_at(&mut self, now_ms: u64) {
        if self.state != StopwatchState::Running {
            return;
        }
        self.accumulated_ms = self.elapsed_at(now_ms);
        self.started_epoch_ms = None;
        self.state = StopwatchState::Stopped;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn lap(&mut self) {
        self.lap_at(now_ms());
    }

    /// Capture the current elapsed reading. A no-op unless running.
    pub fn lap_at(&mut self, now_ms: u64) {
        if self.state == StopwatchState::Running {
            let elapsed = self.elapsed_at(now_ms);
            self.laps.push(elapsed);
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_at(now_ms())
    }

    /// Elapsed milliseconds at a given instant, wrapped at 24 hours.
    pub fn elapsed_at(&self, now_ms: u64) -> u64 {
        let running = match self.started_epoch_ms {
            Some(started) => now_ms.saturating_sub(started),
            None => 0,
        };
        (self.accumulated_ms + running) % DAY_MS
    }

    pub fn display(&self) -> String {
        display_ms(self.elapsed_ms())
    }
}

/// `HH:MM:SS` rendering of a millisecond count.
pub fn display_ms(ms: u64) -> String {
    let total_secs = (ms % DAY_MS) / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Load the persisted stopwatch; a fresh one when never saved. Corrupt
/// data degrades to a fresh stopwatch with a logged diagnostic.
pub fn load(db: &Database) -> Result<Stopwatch, StoreError> {
    match db.kv_get(STOPWATCH_KEY)? {
        None => Ok(Stopwatch::new()),
        Some(json) => match serde_json::from_str(&json) {
            Ok(sw) => Ok(sw),
            Err(e) => {
                log::warn!("discarding persisted stopwatch: {e}");
                Ok(Stopwatch::new())
            }
        },
    }
}

/// Persist the stopwatch.
pub fn save(db: &Database, stopwatch: &Stopwatch) -> Result<(), StoreError> {
    let json = serde_json::to_string(stopwatch).map_err(StoreError::Encode)?;
    db.kv_set(STOPWATCH_KEY, &json)
}
