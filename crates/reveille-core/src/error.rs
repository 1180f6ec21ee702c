//! Core error types for reveille-core.
//!
//! Recoverable conditions are values in this hierarchy; calendar faults
//! (impossible components like minute 70) are programmer errors and stay
//! fatal panics in [`crate::clock`], never caught.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for reveille-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Alarm-store and persistence errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Alarm-store and persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the alarm database
    #[error("Failed to open alarm database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Storage directory could not be created or resolved
    #[error("Storage directory unavailable: {0}")]
    DirUnavailable(#[from] std::io::Error),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Persisted snapshot does not parse against the alarm schema.
    /// Callers treat this as "no alarms" plus a surfaced diagnostic.
    #[error("Persisted alarm data is corrupt: {0}")]
    CorruptData(String),

    /// Snapshot could not be encoded for persistence
    #[error("Failed to encode alarm snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// Add rejected: an equal alarm already exists. Recoverable and
    /// user-facing; callers re-prompt rather than crash.
    #[error("An identical or similar alarm already exists")]
    DuplicateAlarm,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration or a configuration value
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
