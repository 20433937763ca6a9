//! Application configuration management.
//!
//! The config file stores client-level state that is not user data: which
//! user namespace is active and the default countdown length for study
//! sessions. Per-user settings (notification preferences) live in the record
//! store instead; see `libs::settings`.
//!
//! Stored as JSON in the platform data directory, next to the database.

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_SESSION_MINUTES: i64 = 25;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Identifier namespacing all record store collections.
    pub active_user: Option<String>,
    /// Countdown length used when `session` is run without `--duration`.
    pub default_session_minutes: Option<i64>,
}

impl Config {
    /// Loads the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn read() -> Result<Self> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME).map_err(|e| msg_error_anyhow!(Message::ConfigReadError(e.to_string())))?;
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let file = File::open(&config_path)?;
        let config = serde_json::from_reader(file).map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME).map_err(|e| msg_error_anyhow!(Message::ConfigReadError(e.to_string())))?;
        fs::write(&config_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Interactive setup: prompts for the user identifier and the default
    /// session length, starting from current values.
    pub fn init() -> Result<Self> {
        let current = Self::read()?;
        let theme = ColorfulTheme::default();

        let active_user: String = Input::with_theme(&theme)
            .with_prompt("User identifier")
            .with_initial_text(current.active_user.unwrap_or_default())
            .interact_text()?;

        let default_session_minutes: i64 = Input::with_theme(&theme)
            .with_prompt("Default session duration (minutes)")
            .default(current.default_session_minutes.unwrap_or(DEFAULT_SESSION_MINUTES))
            .interact_text()?;

        Ok(Config {
            active_user: Some(active_user),
            default_session_minutes: Some(default_session_minutes),
        })
    }

    /// The active user id, or an error asking for `stula init` first.
    pub fn require_user(&self) -> Result<String> {
        self.active_user.clone().filter(|u| !u.is_empty()).ok_or_else(|| msg_error_anyhow!(Message::NoActiveUser))
    }

    pub fn session_minutes(&self) -> i64 {
        self.default_session_minutes.unwrap_or(DEFAULT_SESSION_MINUTES)
    }
}
