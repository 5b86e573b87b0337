//! Read-only queries: recent saves and the active configuration

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::{Config, HotkeyLabels};
use crate::constants::files;
use crate::saver::filename::{self, TemplateVars};

/// A saved clipboard file found in the save directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Local>,
}

/// All managed files in `dir`, newest first.
///
/// Symlinks are followed; links whose target is missing are skipped.
/// Files with equal modification times keep directory enumeration order.
/// A missing directory is treated as empty.
pub fn scan_saves(dir: &Path) -> Result<Vec<SavedFile>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut saves = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {:?}", dir))? {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", dir))?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some(files::EXTENSION) {
            continue;
        }

        let Ok(metadata) = fs::metadata(&path) else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        saves.push(SavedFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
            modified: modified.into(),
        });
    }

    // Stable sort keeps enumeration order for ties
    saves.sort_by(|a, b| b.modified.cmp(&a.modified));

    Ok(saves)
}

/// At most `count` of the newest saves in `dir`
pub fn list_saves(dir: &Path, count: usize) -> Result<Vec<SavedFile>> {
    let mut saves = scan_saves(dir)?;
    saves.truncate(count);
    Ok(saves)
}

/// Text shown by `--list`
pub fn render_listing(saves: &[SavedFile]) -> String {
    if saves.is_empty() {
        return "No saved clipboard files found.".to_string();
    }

    let mut out = String::from("\nRecent clipboard saves (newest first):\n");
    out.push_str(&"-".repeat(80));
    for (i, save) in saves.iter().enumerate() {
        out.push_str(&format!(
            "\n{:2}. {} | {:6} bytes | {}",
            i + 1,
            save.modified.format("%Y-%m-%d %H:%M:%S"),
            save.size,
            save.name
        ));
    }
    out
}

/// Snapshot of the active settings for `--info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSummary {
    pub save_dir: PathBuf,
    pub file_template: String,
    pub log_level: String,
    pub notifications: bool,
    pub total_files: usize,
    pub hotkeys: HotkeyLabels,
    /// Template applied to [`TemplateVars::example`]
    pub example_filename: String,
    /// Set when the template cannot be rendered and the fallback is shown
    pub template_error: Option<String>,
}

impl ConfigSummary {
    pub fn collect(config: &Config) -> Result<Self> {
        let save_dir = config.save_dir_path();
        let total_files = scan_saves(&save_dir)?.len();

        let example_vars = TemplateVars::example();
        let (example_filename, template_error) =
            match filename::render(&config.file_template, &example_vars) {
                Ok(name) => (name, None),
                Err(e) => (example_vars.fallback_name(), Some(e.to_string())),
            };

        Ok(Self {
            save_dir,
            file_template: config.file_template.clone(),
            log_level: config.log_level.clone(),
            notifications: config.notifications,
            total_files,
            hotkeys: config.hotkeys.clone(),
            example_filename,
            template_error,
        })
    }
}

impl fmt::Display for ConfigSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nClipboard Saver - Configuration Info")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "Save directory: {}", self.save_dir.display())?;
        writeln!(f, "File template: {}", self.file_template)?;
        writeln!(f, "Log level: {}", self.log_level)?;
        writeln!(
            f,
            "Notifications: {}",
            if self.notifications { "enabled" } else { "disabled" }
        )?;
        writeln!(f, "Total saved files: {}", self.total_files)?;
        writeln!(f, "Quick save hotkey: {}", self.hotkeys.quick_save)?;
        writeln!(f, "Custom save hotkey: {}", self.hotkeys.custom_save)?;
        match &self.template_error {
            None => write!(f, "Example filename: {}", self.example_filename),
            Some(e) => write!(
                f,
                "Example filename: {} (template error: {})",
                self.example_filename, e
            ),
        }
    }
}
