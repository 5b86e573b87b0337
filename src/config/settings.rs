//! User settings loaded from JSON
//!
//! Every key is optional in the file; missing keys take the values from
//! `constants::defaults`. Keys the saver does not know are kept in `extra`
//! so that writing the config back does not drop them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

use crate::config::hotkeys::HotkeyLabels;
use crate::constants;

/// Settings for one process, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Target directory, may start with `~`
    #[serde(default = "default_save_dir")]
    pub save_dir: String,

    /// File name template, see `saver::filename`
    #[serde(default = "default_file_template")]
    pub file_template: String,

    /// Maximum characters of clipboard text used in a file name
    #[serde(default = "default_max_filename_length")]
    pub max_filename_length: usize,

    #[serde(default = "default_notifications")]
    pub notifications: bool,

    /// Level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub hotkeys: HotkeyLabels,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// Default value functions
fn default_save_dir() -> String {
    constants::defaults::SAVE_DIR.to_string()
}

fn default_file_template() -> String {
    constants::defaults::FILE_TEMPLATE.to_string()
}

fn default_max_filename_length() -> usize {
    constants::defaults::MAX_FILENAME_LENGTH
}

fn default_notifications() -> bool {
    constants::defaults::NOTIFICATIONS
}

fn default_log_level() -> String {
    constants::defaults::LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            file_template: default_file_template(),
            max_filename_length: default_max_filename_length(),
            notifications: default_notifications(),
            log_level: default_log_level(),
            hotkeys: HotkeyLabels::default(),
            extra: serde_json::Map::new(),
        }
    }
}

impl Config {
    /// Standard config location: `<config dir>/clipboard-saver/config.json`
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(constants::config::APP_DIR);
        path.push(constants::config::FILENAME);
        path
    }

    /// Load settings from `path` (or the standard location), overlaying the
    /// file's keys on the defaults.
    ///
    /// Never fails: an unreadable or malformed file prints a warning to
    /// stderr and yields the defaults. Runs before the subscriber is
    /// installed, so it cannot use `tracing`.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = match path {
            Some(p) => expand_home(&p.to_string_lossy()),
            None => Self::path(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::read(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {:#}. Using defaults.", e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?;
        Ok(config)
    }

    /// Defaults plus the `_comment` key documenting template variables
    pub fn documented_default() -> Self {
        let mut config = Self::default();
        config.extra.insert(
            constants::config::COMMENT_KEY.to_string(),
            serde_json::Value::String(constants::config::COMMENT_TEXT.to_string()),
        );
        config
    }

    /// Write this config as pretty JSON, creating the parent directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let json_string =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        fs::write(path, json_string)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Write a fresh documented default config to the standard location,
    /// replacing any existing file
    pub fn init_default() -> Result<PathBuf> {
        let path = Self::path();
        Self::documented_default().save_to(&path)?;
        Ok(path)
    }

    /// Save directory with `~` expanded
    pub fn save_dir_path(&self) -> PathBuf {
        expand_home(&self.save_dir)
    }

    /// Tracing level for the configured `log_level`; unknown names map to INFO
    pub fn tracing_level(&self) -> Level {
        match self.log_level.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Level::TRACE,
            "DEBUG" => Level::DEBUG,
            "WARNING" | "WARN" => Level::WARN,
            "ERROR" | "CRITICAL" | "FATAL" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Expand a leading `~` or `~/` to the user's home directory
pub fn expand_home(raw: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (raw, home) {
        ("~", Some(home)) => home,
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => PathBuf::from(s),
    }
}
