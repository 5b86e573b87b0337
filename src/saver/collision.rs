//! Collision-free target paths
//!
//! An occupied `name.txt` becomes `name_01.txt`, `name_02.txt`, ... in the
//! same directory. The check-then-write is not atomic across processes.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::files::MAX_COLLISION_SUFFIX;

#[derive(Debug, Error)]
pub enum CollisionError {
    #[error("no free file name for {path:?} after {attempts} numbered suffixes")]
    Exhausted { path: PathBuf, attempts: u32 },
}

/// First path, starting with `path` itself, that does not exist yet
pub fn resolve(path: &Path) -> Result<PathBuf, CollisionError> {
    resolve_with_limit(path, MAX_COLLISION_SUFFIX)
}

/// Any directory entry counts, including a symlink whose target is missing
fn is_occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

fn resolve_with_limit(path: &Path, max_suffix: u32) -> Result<PathBuf, CollisionError> {
    if !is_occupied(path) {
        return Ok(path.to_path_buf());
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    for counter in 1..=max_suffix {
        let candidate = parent.join(format!("{}_{:02}{}", stem, counter, extension));
        if !is_occupied(&candidate) {
            return Ok(candidate);
        }
    }

    Err(CollisionError::Exhausted {
        path: path.to_path_buf(),
        attempts: max_suffix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_free_path_is_returned_unchanged() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("clip.txt");
        assert_eq!(resolve(&path).unwrap(), path);
    }

    #[test]
    fn test_numbered_suffixes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("clip.txt");
        fs::write(&path, "a").unwrap();

        let first = resolve(&path).unwrap();
        assert_eq!(first, temp_dir.path().join("clip_01.txt"));
        fs::write(&first, "b").unwrap();

        let second = resolve(&path).unwrap();
        assert_eq!(second, temp_dir.path().join("clip_02.txt"));
        assert!(!second.exists());
    }

    #[test]
    fn test_gap_in_suffixes_is_reused() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("clip.txt");
        fs::write(&path, "a").unwrap();
        fs::write(temp_dir.path().join("clip_02.txt"), "c").unwrap();

        assert_eq!(resolve(&path).unwrap(), temp_dir.path().join("clip_01.txt"));
    }

    #[test]
    fn test_only_last_extension_is_kept_after_suffix() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("notes.md.txt");
        fs::write(&path, "a").unwrap();

        assert_eq!(
            resolve(&path).unwrap(),
            temp_dir.path().join("notes.md_01.txt")
        );
    }

    #[test]
    fn test_no_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("README");
        fs::write(&path, "a").unwrap();

        assert_eq!(resolve(&path).unwrap(), temp_dir.path().join("README_01"));
    }

    #[test]
    fn test_suffix_widens_past_two_digits() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("clip.txt");
        fs::write(&path, "a").unwrap();
        for n in 1..=99 {
            fs::write(temp_dir.path().join(format!("clip_{:02}.txt", n)), "x").unwrap();
        }

        assert_eq!(resolve(&path).unwrap(), temp_dir.path().join("clip_100.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_occupied() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("clip.txt");
        std::os::unix::fs::symlink(temp_dir.path().join("missing-target"), &path).unwrap();

        let resolved = resolve(&path).unwrap();
        assert_eq!(resolved, temp_dir.path().join("clip_01.txt"));

        crate::saver::writer::write(&resolved, "saved").unwrap();
        assert_eq!(fs::read_to_string(&resolved).unwrap(), "saved");
    }

    #[test]
    fn test_exhausted_after_limit() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("clip.txt");
        fs::write(&path, "a").unwrap();
        for n in 1..=3 {
            fs::write(temp_dir.path().join(format!("clip_{:02}.txt", n)), "x").unwrap();
        }

        let err = resolve_with_limit(&path, 3).unwrap_err();
        assert!(matches!(err, CollisionError::Exhausted { attempts: 3, .. }));
    }
}
