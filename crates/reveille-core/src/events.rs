//! Domain events emitted by the store and scheduler layers.
//!
//! Serialized with a `type` tag so hosts can log or forward them as a
//! single stream.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    AlarmAdded {
        id: String,
        summary: String,
        at: DateTime<Utc>,
    },
    AlarmRemoved {
        id: String,
        at: DateTime<Utc>,
    },
    AlarmFired {
        id: String,
        summary: String,
        at: DateTime<Utc>,
    },
    AlarmDismissed {
        id: String,
        at: DateTime<Utc>,
    },
    NotificationScheduled {
        id: String,
        fire_at: DateTime<Local>,
        summary: String,
        at: DateTime<Utc>,
    },
    NotificationCancelled {
        id: String,
        at: DateTime<Utc>,
    },
    StopwatchLap {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Event timestamp, uniform across variants.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::AlarmAdded { at, .. }
            | Event::AlarmRemoved { at, .. }
            | Event::AlarmFired { at, .. }
            | Event::AlarmDismissed { at, .. }
            | Event::NotificationScheduled { at, .. }
            | Event::NotificationCancelled { at, .. }
            | Event::StopwatchLap { at, .. } => *at,
        }
    }
}
