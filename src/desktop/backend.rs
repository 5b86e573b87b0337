//! Desktop capability abstraction layer
//!
//! The saver talks to the clipboard, the filename dialog and the
//! notification daemon only through these traits, so tests can swap in
//! in-memory doubles.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read clipboard text: {0}")]
    Read(String),
}

/// Source of the current clipboard text
pub trait ClipboardSource {
    /// Current clipboard content as UTF-8 text.
    ///
    /// An empty clipboard (or one holding no text) is `Ok("")`.
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// Interactive desktop facilities
pub trait Desktop {
    /// Ask the user for a file name, prefilled with `suggested`.
    ///
    /// `None` means the user cancelled or the dialog could not be shown.
    fn prompt_filename(&self, suggested: &str) -> Option<String>;

    /// Show a desktop notification. Best effort; failures are swallowed.
    fn notify(&self, title: &str, body: &str, expire: Duration);
}
