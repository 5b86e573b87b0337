//! Clipboard saving
//!
//! One save per process: read the clipboard, pick a name (template, given,
//! or prompted), make it unique in the save directory and write it.
//! Failures are logged and reported through a desktop notification before
//! they are returned, so the entry point only has to pick an exit code.

pub mod collision;
pub mod filename;
pub mod writer;

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;
use crate::constants::desktop as notify_consts;
use crate::desktop::{ClipboardError, ClipboardSource, Desktop};

pub use collision::CollisionError;
pub use writer::WriteError;

/// How the file name is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveMode {
    /// Render the configured template
    Quick,
    /// Use this exact name (`.txt` is appended when missing)
    Named(String),
    /// Ask through the entry dialog, suggesting the template name
    Prompt,
}

impl SaveMode {
    fn label(&self) -> &'static str {
        match self {
            SaveMode::Quick => "Quick",
            SaveMode::Named(_) | SaveMode::Prompt => "Custom",
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("clipboard is empty or contains only whitespace")]
    EmptyClipboard,

    #[error(transparent)]
    ClipboardAccess(#[from] ClipboardError),

    #[error("filename dialog was cancelled")]
    DialogCancelled,

    #[error(transparent)]
    Collision(#[from] CollisionError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

pub struct ClipboardSaver<C, D> {
    config: Config,
    save_dir: PathBuf,
    clipboard: C,
    desktop: D,
}

impl<C: ClipboardSource, D: Desktop> ClipboardSaver<C, D> {
    pub fn new(config: Config, clipboard: C, desktop: D) -> Self {
        let save_dir = config.save_dir_path();
        info!(save_dir = %save_dir.display(), "Save directory");
        Self {
            config,
            save_dir,
            clipboard,
            desktop,
        }
    }

    /// Save the clipboard now
    pub fn save(&mut self, mode: SaveMode) -> Result<PathBuf, SaveError> {
        self.save_at(mode, &Local::now())
    }

    /// Save the clipboard as if the current time were `now`
    pub fn save_at<Tz>(&mut self, mode: SaveMode, now: &DateTime<Tz>) -> Result<PathBuf, SaveError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self.try_save(&mode, now) {
            Ok(path) => {
                self.report_success(&mode, &path);
                Ok(path)
            }
            Err(e) => {
                self.report_failure(&e);
                Err(e)
            }
        }
    }

    fn try_save<Tz>(&mut self, mode: &SaveMode, now: &DateTime<Tz>) -> Result<PathBuf, SaveError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let text = self.clipboard.read_text()?;
        info!(chars = text.chars().count(), "Clipboard content length");

        if text.trim().is_empty() {
            return Err(SaveError::EmptyClipboard);
        }

        let name = match mode {
            SaveMode::Quick => self.template_name(&text, now),
            SaveMode::Named(name) => filename::ensure_txt_extension(name),
            SaveMode::Prompt => {
                let suggested = self.template_name(&text, now);
                let entered = self
                    .desktop
                    .prompt_filename(&suggested)
                    .ok_or(SaveError::DialogCancelled)?;
                filename::ensure_txt_extension(&entered)
            }
        };

        let target = collision::resolve(&self.save_dir.join(name))?;
        let written = writer::write(&target, &text)?;
        Ok(written)
    }

    fn template_name<Tz>(&self, text: &str, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        filename::derive_or_fallback(
            &self.config.file_template,
            text,
            now,
            self.config.max_filename_length,
        )
    }

    fn report_success(&self, mode: &SaveMode, path: &std::path::Path) {
        info!(path = %path.display(), "Clipboard saved");

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.notify(
            &format!("Clipboard Saved ({})", mode.label()),
            &shorten_for_display(&name),
            notify_consts::NOTIFY_SHORT_MS,
        );
    }

    fn report_failure(&self, err: &SaveError) {
        match err {
            SaveError::EmptyClipboard => {
                info!("Clipboard is empty or contains only whitespace");
                self.notify(
                    "Clipboard Saver",
                    "Clipboard is empty",
                    notify_consts::NOTIFY_SHORT_MS,
                );
            }
            SaveError::ClipboardAccess(e) => {
                error!(error = %e, "Clipboard access error");
                self.notify(
                    "Clipboard Error",
                    "Cannot access clipboard",
                    notify_consts::NOTIFY_LONG_MS,
                );
            }
            SaveError::DialogCancelled => {
                info!("User cancelled filename dialog");
            }
            SaveError::Collision(_) | SaveError::Write(_) => {
                error!(error = %err, "Failed to save clipboard");
                let message: String = err
                    .to_string()
                    .chars()
                    .take(notify_consts::NOTIFY_ERROR_CHARS)
                    .collect();
                self.notify(
                    "Error",
                    &format!("Failed to save clipboard: {}...", message),
                    notify_consts::NOTIFY_LONG_MS,
                );
            }
        }
    }

    fn notify(&self, title: &str, body: &str, expire_ms: u64) {
        if self.config.notifications {
            self.desktop
                .notify(title, body, Duration::from_millis(expire_ms));
        }
    }
}

/// Shorten long file names for a notification body
fn shorten_for_display(name: &str) -> String {
    let max = notify_consts::NOTIFY_NAME_MAX;
    if name.chars().count() > max {
        let head: String = name.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}
