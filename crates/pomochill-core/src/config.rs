//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Countdown and cycle durations (whole seconds)
//! - Notification preferences
//! - Ambient stream catalog and default volume
//!
//! Configuration is stored at `~/.config/pomochill/config.toml`; set
//! `POMOCHILL_CONFIG_DIR` to relocate it (tests do).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::player::{default_streams, Stream, DEFAULT_VOLUME};
use crate::timer::CycleDurations;

/// Countdown and cycle settings, in whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_secs")]
    pub focus_secs: u64,
    #[serde(default = "default_short_break_secs")]
    pub short_break_secs: u64,
    #[serde(default = "default_long_break_secs")]
    pub long_break_secs: u64,
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
    /// Step applied by the +/- manual adjustment, and the floor a decrease
    /// may not cross.
    #[serde(default = "default_adjust_step_secs")]
    pub adjust_step_secs: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_notification_volume")]
    pub volume: u8,
    /// Path to a custom completion sound (optional). If unset, the shell's
    /// default chime is used.
    #[serde(default)]
    pub custom_sound: Option<String>,
}

/// Ambient player configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientConfig {
    #[serde(default = "default_ambient_volume")]
    pub volume: u8,
    #[serde(default = "default_streams")]
    pub streams: Vec<Stream>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomochill/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub ambient: AmbientConfig,
}

// Default functions
fn default_focus_secs() -> u64 {
    25 * 60
}
fn default_short_break_secs() -> u64 {
    5 * 60
}
fn default_long_break_secs() -> u64 {
    15 * 60
}
fn default_sessions_before_long_break() -> u32 {
    4
}
fn default_adjust_step_secs() -> u64 {
    5 * 60
}
fn default_true() -> bool {
    true
}
fn default_notification_volume() -> u8 {
    50
}
fn default_ambient_volume() -> u8 {
    DEFAULT_VOLUME
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_secs: default_focus_secs(),
            short_break_secs: default_short_break_secs(),
            long_break_secs: default_long_break_secs(),
            sessions_before_long_break: default_sessions_before_long_break(),
            adjust_step_secs: default_adjust_step_secs(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_notification_volume(),
            custom_sound: None,
        }
    }
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            volume: default_ambient_volume(),
            streams: default_streams(),
        }
    }
}

/// Returns `~/.config/pomochill/`, honouring `POMOCHILL_CONFIG_DIR`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("POMOCHILL_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pomochill"),
    };
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Scalar keys addressable by `get`/`set`.
pub const KEYS: [&str; 8] = [
    "timer.focus_secs",
    "timer.short_break_secs",
    "timer.long_break_secs",
    "timer.sessions_before_long_break",
    "timer.adjust_step_secs",
    "notifications.enabled",
    "notifications.volume",
    "ambient.volume",
];

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk, writing out the default on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "timer.focus_secs" => self.timer.focus_secs.to_string(),
            "timer.short_break_secs" => self.timer.short_break_secs.to_string(),
            "timer.long_break_secs" => self.timer.long_break_secs.to_string(),
            "timer.sessions_before_long_break" => {
                self.timer.sessions_before_long_break.to_string()
            }
            "timer.adjust_step_secs" => self.timer.adjust_step_secs.to_string(),
            "notifications.enabled" => self.notifications.enabled.to_string(),
            "notifications.volume" => self.notifications.volume.to_string(),
            "ambient.volume" => self.ambient.volume.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a config value by dotted key. The caller persists with [`save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse.
    ///
    /// [`save`]: Config::save
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
        where
            T::Err: std::fmt::Display,
        {
            value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        }

        match key {
            "timer.focus_secs" => self.timer.focus_secs = parse(key, value)?,
            "timer.short_break_secs" => self.timer.short_break_secs = parse(key, value)?,
            "timer.long_break_secs" => self.timer.long_break_secs = parse(key, value)?,
            "timer.sessions_before_long_break" => {
                self.timer.sessions_before_long_break = parse(key, value)?
            }
            "timer.adjust_step_secs" => self.timer.adjust_step_secs = parse(key, value)?,
            "notifications.enabled" => self.notifications.enabled = parse(key, value)?,
            "notifications.volume" => self.notifications.volume = parse(key, value)?,
            "ambient.volume" => self.ambient.volume = parse(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// The timer's view of this configuration.
    pub fn durations(&self) -> CycleDurations {
        CycleDurations {
            focus_secs: self.timer.focus_secs,
            short_break_secs: self.timer.short_break_secs,
            long_break_secs: self.timer.long_break_secs,
            sessions_before_long_break: self.timer.sessions_before_long_break,
        }
    }
}
