//! Core library for Reveille.
//!
//! Alarm entities and the next-activation algorithm, wake challenges,
//! notification scheduling, the stopwatch, and SQLite-backed persistence.
//! The library is host-agnostic: wall-clock time flows in through
//! [`clock`], notifications flow out through [`scheduler::Notifier`].

pub mod alarm;
pub mod challenge;
pub mod clock;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod stopwatch;
pub mod storage;
pub mod store;

pub use alarm::{ring_tone, Alarm, RingTone, WakeMethod, RING_TONES, WAKE_METHODS};
pub use challenge::{Challenge, Selection};
pub use error::{ConfigError, CoreError, Result, StoreError};
pub use events::Event;
pub use scheduler::Notifier;
pub use session::ActivationSession;
pub use stopwatch::Stopwatch;
pub use storage::{Config, Database, NotificationsConfig};
pub use store::AlarmStore;
