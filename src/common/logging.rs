//! Tracing setup: stdout plus an appending log file

use std::fs::{self, File, OpenOptions};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::constants;

/// `<data-local dir>/clipboard-saver/clipboard_saver.log`
pub fn log_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(constants::logging::APP_DIR);
    path.push(constants::logging::FILENAME);
    path
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Colour codes only for an interactive terminal
fn wants_ansi(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

/// Install the global subscriber at `level` (`RUST_LOG` wins when set).
///
/// If the log file cannot be opened, logging stays on stdout only.
pub fn init(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let path = log_file_path();
    let file_layer = match open_log_file(&path) {
        Ok(file) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        Err(e) => {
            eprintln!("Cannot open log file {:?}: {}. Logging to stdout only.", path, e);
            None
        }
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(wants_ansi(&std::io::stdout()))
                .with_writer(std::io::stdout),
        )
        .with(file_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}
