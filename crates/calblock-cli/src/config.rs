//! Client configuration.
//!
//! All settings live in a single `config.toml` at
//! `~/.config/calblock/config.toml` by default. CLI flags override file
//! values; file values override built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use calblock_core::{DEFAULT_TIMEZONE, DEFAULT_TITLE};

/// Configuration for the calblock client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Google Calendar settings.
    pub google: GoogleSettings,

    /// Sync settings.
    pub sync: SyncSettings,
}

/// Google Calendar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// Path to the service-account credentials JSON.
    pub credentials_path: Option<PathBuf>,

    /// Target calendar id.
    pub calendar_id: String,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            credentials_path: None,
            calendar_id: "primary".to_string(),
        }
    }
}

/// Sync settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// IANA timezone applied to event times.
    pub timezone: String,

    /// Title given to blocks with an empty title cell.
    pub default_title: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calblock")
            .join("config.toml")
    }

    /// Loads the configuration from the default path.
    ///
    /// A missing file yields the built-in defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }
}
