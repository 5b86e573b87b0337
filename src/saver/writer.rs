//! Writes clipboard text to disk

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Write `content` verbatim as UTF-8 to `path`, creating parent directories.
///
/// The file is opened with `create_new`, so a file that appeared after
/// collision resolution is reported as an error rather than clobbered.
pub fn write(path: &Path, content: &str) -> Result<PathBuf, WriteError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let to_write_error = |source: io::Error| WriteError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(to_write_error)?;
    file.write_all(content.as_bytes()).map_err(to_write_error)?;
    file.flush().map_err(to_write_error)?;

    debug!(path = %path.display(), bytes = content.len(), "Wrote clipboard content");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_preserves_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("clip.txt");
        let text = "first line\nsecond line\r\n  indented\tÜnïcödé ✓ 漢字\n";

        let written = write(&path, text).unwrap();

        assert_eq!(written, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_creates_missing_parents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("a").join("b").join("clip.txt");

        write(&path, "x").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("clip.txt");
        fs::write(&path, "original").unwrap();

        let err = write(&path, "new").unwrap_err();

        assert!(matches!(err, WriteError::Write { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_parent_is_a_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = write(&blocker.join("clip.txt"), "x").unwrap_err();

        assert!(matches!(err, WriteError::CreateDir { .. }));
    }
}
