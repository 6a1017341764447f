//! Filesystem Utilities.
//!
//! Helpers for the few filesystem operations the activity performs, mapped
//! into `CoreError::Filesystem` so callers always learn which path failed.

use crate::error::CoreError;
use std::fs;
use std::path::Path;

/// Ensures that a directory exists at the given path.
///
/// Missing directories (and their parents) are created. A path that exists
/// but is not a directory is an error.
///
/// # Examples
///
/// ```no_run
/// # use helloworld_core::utils::fs::ensure_dir_exists;
/// # use tempfile::tempdir;
/// let temp_dir = tempdir().unwrap();
/// let dir_path = temp_dir.path().join("instance");
///
/// ensure_dir_exists(&dir_path).unwrap();
/// assert!(dir_path.is_dir());
/// ```
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if !path.is_dir() {
            Err(CoreError::Filesystem {
                message: "Path exists but is not a directory".to_string(),
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "Path exists but is not a directory",
                ),
            })
        } else {
            Ok(())
        }
    } else {
        fs::create_dir_all(path).map_err(|e| CoreError::Filesystem {
            message: "Failed to create directory".to_string(),
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Reads the entire contents of a file into a string.
pub fn read_to_string(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|e| CoreError::Filesystem {
        message: "Failed to read file to string".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}

/// Moves a file, falling back to copy-and-remove when `rename` cannot cross
/// filesystems.
pub fn move_file(from: &Path, to: &Path) -> Result<(), CoreError> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to).map_err(|e| CoreError::Filesystem {
        message: "Failed to copy file".to_string(),
        path: from.to_path_buf(),
        source: e,
    })?;
    fs::remove_file(from).map_err(|e| CoreError::Filesystem {
        message: "Failed to remove source file after copy".to_string(),
        path: from.to_path_buf(),
        source: e,
    })
}
