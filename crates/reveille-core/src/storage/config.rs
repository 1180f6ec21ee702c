//! TOML-based application configuration.
//!
//! Stores the preferences the add-alarm flow and the CLI surface read:
//! time format, default tone and wake method, notification preferences.
//! Stored at `~/.config/reveille/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::alarm::RING_TONES;
use crate::error::ConfigError;

/// Notification preferences handed to the scheduling sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_volume")]
    pub volume: u32,
    #[serde(default = "default_true")]
    pub vibration: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/reveille/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// chrono format string for clock display.
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// Tone preselected in the add-alarm flow.
    #[serde(default = "default_tone_id")]
    pub default_tone_id: u32,
    /// Wake method catalog index preselected in the add-alarm flow.
    #[serde(default = "default_wake_method")]
    pub default_wake_method: usize,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_time_format() -> String {
    "%-I:%M %p".to_string()
}
fn default_tone_id() -> u32 {
    RING_TONES[0].tone_id
}
fn default_wake_method() -> usize {
    // Math 1
    1
}
fn default_true() -> bool {
    true
}
fn default_volume() -> u32 {
    100
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
            vibration: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
            default_tone_id: default_tone_id(),
            default_wake_method: default_wake_method(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string())),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(match current {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the field's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        self.save()
    }
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let unknown = || ConfigError::ParseFailed(format!("unknown config key: {key}"));

    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };

    let mut current = root;
    if let Some(parents) = parents {
        for part in parents.split('.') {
            current = current.get_mut(part).ok_or_else(unknown)?;
        }
    }

    let obj = current.as_object_mut().ok_or_else(unknown)?;
    let existing = obj.get(leaf).ok_or_else(unknown)?;

    let new_value = match existing {
        serde_json::Value::Bool(_) => serde_json::Value::Bool(
            value
                .parse::<bool>()
                .map_err(|_| ConfigError::ParseFailed(format!("cannot parse '{value}' as bool")))?,
        ),
        serde_json::Value::Number(_) => value
            .parse::<u64>()
            .map(|n| serde_json::Value::Number(n.into()))
            .map_err(|_| ConfigError::ParseFailed(format!("cannot parse '{value}' as number")))?,
        _ => serde_json::Value::String(value.to_string()),
    };

    obj.insert(leaf.to_string(), new_value);
    Ok(())
}
