//! Alarm entity, wake-method catalog and the next-activation algorithm.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock;

/// Wake Verification Method: the challenge a user must complete to dismiss
/// a firing alarm. A closed set, selected at alarm-creation time and
/// dispatched as data rather than re-derived from a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WakeMethodRecord", into = "WakeMethodRecord")]
pub enum WakeMethod {
    Shake,
    MathEasy,
    MathMedium,
    MathHard,
    Factor,
    RockPaperScissors,
}

/// The catalog, in picker order. `index()` is the position here.
pub const WAKE_METHODS: [WakeMethod; 6] = [
    WakeMethod::Shake,
    WakeMethod::MathEasy,
    WakeMethod::MathMedium,
    WakeMethod::MathHard,
    WakeMethod::Factor,
    WakeMethod::RockPaperScissors,
];

impl WakeMethod {
    pub fn index(self) -> usize {
        match self {
            WakeMethod::Shake => 0,
            WakeMethod::MathEasy => 1,
            WakeMethod::MathMedium => 2,
            WakeMethod::MathHard => 3,
            WakeMethod::Factor => 4,
            WakeMethod::RockPaperScissors => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        WAKE_METHODS.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            WakeMethod::Shake => "Shake",
            WakeMethod::MathEasy => "Math 1",
            WakeMethod::MathMedium => "Math 2",
            WakeMethod::MathHard => "Math 3",
            WakeMethod::Factor => "Factor",
            WakeMethod::RockPaperScissors => "RPS",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WakeMethod::Shake => "Shake your phone until it shuts up",
            WakeMethod::MathEasy => "Solve a simple math expression",
            WakeMethod::MathMedium => "Solve a moderate math expression",
            WakeMethod::MathHard => "Solve a hairy math expression",
            WakeMethod::Factor => "Factor a quadratic",
            WakeMethod::RockPaperScissors => "Beat the computer at rock paper scissors",
        }
    }
}

/// Wire form of a wake method in the persisted snapshot: `{index, name, desc}`.
/// Deserialization resolves by index; an out-of-range index is corruption.
#[derive(Serialize, Deserialize)]
struct WakeMethodRecord {
    index: usize,
    name: String,
    desc: String,
}

impl From<WakeMethod> for WakeMethodRecord {
    fn from(method: WakeMethod) -> Self {
        Self {
            index: method.index(),
            name: method.name().to_string(),
            desc: method.description().to_string(),
        }
    }
}

impl TryFrom<WakeMethodRecord> for WakeMethod {
    type Error = String;

    fn try_from(record: WakeMethodRecord) -> Result<Self, Self::Error> {
        WakeMethod::from_index(record.index)
            .ok_or_else(|| format!("unknown wake method index {}", record.index))
    }
}

/// A ring tone in the finite catalog. Alarms reference a tone by id; the
/// id is the platform sound identifier handed to the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingTone {
    pub name: &'static str,
    pub tone_id: u32,
}

pub const RING_TONES: [RingTone; 4] = [
    RingTone { name: "Alarm", tone_id: 1005 },
    RingTone { name: "Bell", tone_id: 1013 },
    RingTone { name: "Chime", tone_id: 1008 },
    RingTone { name: "Horn", tone_id: 1033 },
];

/// Look up a catalog tone by id.
pub fn ring_tone(tone_id: u32) -> Option<&'static RingTone> {
    RING_TONES.iter().find(|t| t.tone_id == tone_id)
}

/// A configured alarm. Owned exclusively by [`crate::store::AlarmStore`]
/// once inserted; edits go through replace-and-resave, never partial
/// in-place mutation of a stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alarm {
    pub enabled: bool,
    /// Wall-clock fire hour, 0-23. Device-local time at evaluation time.
    pub hour: u32,
    /// Wall-clock fire minute, 0-59.
    pub minute: u32,
    #[serde(rename = "text")]
    pub label: String,
    #[serde(rename = "wakeMethod")]
    pub wake_method: WakeMethod,
    #[serde(rename = "toneId")]
    pub tone_id: u32,
    /// Opaque token generated at construction, stable for the alarm's
    /// lifetime. Keys the external notification registration.
    #[serde(rename = "notificationId")]
    pub notification_id: String,
    /// Repeat weekdays, index 0 = Sunday .. 6 = Saturday.
    pub repeats: [bool; 7],
    /// When the alarm last went off; creation time until the first fire.
    /// The reference point for [`Alarm::next_activate`].
    #[serde(rename = "lastActivate")]
    pub last_activate: DateTime<Local>,
}

impl Alarm {
    /// Create an enabled alarm. `last_activate` defaults to now and the
    /// notification id is freshly generated.
    ///
    /// # Panics
    /// Panics on an out-of-range fire time; that is a caller bug, the same
    /// class of fault as an impossible calendar component.
    pub fn new(
        hour: u32,
        minute: u32,
        label: impl Into<String>,
        wake_method: WakeMethod,
        tone_id: u32,
        repeats: [bool; 7],
    ) -> Self {
        assert!(hour < 24 && minute < 60, "invalid alarm time {hour}:{minute}");
        Self {
            enabled: true,
            hour,
            minute,
            label: label.into(),
            wake_method,
            tone_id,
            notification_id: Uuid::new_v4().to_string(),
            repeats,
            last_activate: clock::now(),
        }
    }

    /// True when no repeat weekday is enabled: the alarm fires once and
    /// does not re-arm.
    pub fn one_time(&self) -> bool {
        self.repeats.iter().all(|r| !r)
    }

    /// Minutes past midnight; the store's sort key.
    pub fn minutes_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Fire time in 12-hour clock form, e.g. `7:30 AM`.
    pub fn time_text(&self) -> String {
        let hour12 = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        let ampm = if self.hour < 12 { "AM" } else { "PM" };
        format!("{}:{:02} {}", hour12, self.minute, ampm)
    }

    /// One-line summary for the notification payload.
    pub fn summary(&self) -> String {
        format!("{} at {}", self.label, self.time_text())
    }

    /// The next instant this alarm is due, computed from `last_activate`.
    /// `None` only for a recurring alarm with every weekday disabled,
    /// which never fires; that is a valid terminal state, not an error.
    pub fn next_activate(&self) -> Option<DateTime<Local>> {
        self.next_activate_from(self.last_activate)
    }

    /// Next activation relative to an explicit reference instant.
    pub fn next_activate_from(&self, reference: DateTime<Local>) -> Option<DateTime<Local>> {
        let (y, m, d) = clock::ymd(reference);
        let (ref_hour, ref_minute, _) = clock::hms(reference);

        let mut date = clock::create(y, m, d, self.hour, self.minute);

        // Target time of day already passed relative to the reference.
        if ref_hour > self.hour || (ref_hour == self.hour && ref_minute >= self.minute) {
            date = clock::add_days(date, 1);
        }

        if self.one_time() {
            return Some(date);
        }

        if !self.repeats.iter().any(|r| *r) {
            return None;
        }

        // At least one day is enabled, so this terminates within 7 steps.
        while !self.repeats[clock::weekday_index(date)] {
            date = clock::add_days(date, 1);
        }

        Some(date)
    }

    /// Record a fire. One-time alarms are exhausted and disable themselves.
    pub fn mark_fired(&mut self, at: DateTime<Local>) {
        self.last_activate = at;
        if self.one_time() {
            self.enabled = false;
        }
    }
}

/// Duplicate-detection equality: two alarms are the same configuration
/// when `(hour, minute, label, tone_id, repeats)` match, regardless of
/// `enabled`, `last_activate` or `notification_id`.
impl PartialEq for Alarm {
    fn eq(&self, other: &Self) -> bool {
        self.hour == other.hour
            && self.minute == other.minute
            && self.label == other.label
            && self.tone_id == other.tone_id
            && self.repeats == other.repeats
    }
}
