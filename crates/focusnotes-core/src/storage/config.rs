//! TOML-based notification settings.
//!
//! One boolean per notification category plus the daily reminder time.
//! Stored at `~/.config/focusnotes/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// User notification preferences.
///
/// Serialized to/from TOML at `~/.config/focusnotes/config.toml`. `enabled`
/// is the master switch; the per-category flags gate individual kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Master switch. Off means no notifications of any kind.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub vibration: bool,
    /// Recurring "keep your streak" reminder.
    #[serde(default = "default_true")]
    pub daily_streak_reminders: bool,
    /// Session start/end notifications.
    #[serde(default = "default_true")]
    pub pomodoro_notifications: bool,
    /// One-shot notifications at streak 7/14/30.
    #[serde(default = "default_true")]
    pub streak_milestones: bool,
    /// Badge unlock notifications.
    #[serde(default = "default_true")]
    pub achievements: bool,
    /// HH:MM wall-clock time for the daily streak reminder.
    #[serde(default = "default_reminder_time")]
    pub daily_reminder_time: String,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_reminder_time() -> String {
    "19:00".into()
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
            vibration: true,
            daily_streak_reminders: true,
            pomodoro_notifications: true,
            streak_milestones: true,
            achievements: true,
            daily_reminder_time: default_reminder_time(),
        }
    }
}

impl NotificationSettings {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk. A missing file yields (and persists) the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the default settings cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.save()?;
                Ok(settings)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a settings value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by key and persist. The new value is parsed
    /// against the type of the existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the settings cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ConfigError::ParseFailed("settings are not a table".into()))?;
        let existing = obj.get(key).ok_or_else(|| ConfigError::InvalidValue {
            key: key.into(),
            message: "unknown settings key".into(),
        })?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => {
                let parsed = value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("cannot parse '{value}' as bool"),
                })?;
                serde_json::Value::Bool(parsed)
            }
            _ => {
                if key == "daily_reminder_time"
                    && chrono::NaiveTime::parse_from_str(value, "%H:%M").is_err()
                {
                    return Err(ConfigError::InvalidValue {
                        key: key.into(),
                        message: format!("'{value}' is not a HH:MM time"),
                    });
                }
                serde_json::Value::String(value.into())
            }
        };

        obj.insert(key.to_string(), new_value);
        *self = serde_json::from_value(json)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = NotificationSettings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: NotificationSettings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
        assert_eq!(parsed.daily_reminder_time, "19:00");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: NotificationSettings =
            toml::from_str("enabled = false\ndaily_reminder_time = \"08:30\"\n").unwrap();
        assert!(!parsed.enabled);
        assert!(parsed.sound);
        assert!(parsed.achievements);
        assert_eq!(parsed.daily_reminder_time, "08:30");
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_time() {
        let mut settings = NotificationSettings::default();
        assert!(matches!(
            settings.set("volume", "50"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("daily_reminder_time", "25:99"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(settings.daily_reminder_time, "19:00");
    }

    #[test]
    fn get_reads_by_key() {
        let settings = NotificationSettings::default();
        assert_eq!(settings.get("enabled").as_deref(), Some("true"));
        assert_eq!(settings.get("daily_reminder_time").as_deref(), Some("19:00"));
        assert!(settings.get("missing").is_none());
    }
}
