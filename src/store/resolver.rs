//! Store directory resolution
//!
//! Precedence, highest first:
//! 1. Explicit directory, used verbatim
//! 2. `<base_directory>/<name>`
//! 3. `<name>`, relative to the working directory
//!
//! `name` falls back to [`DEFAULT_NAME`]. The precedence decides where
//! data lands on disk and must not change.

use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};

/// Store name used when none was configured
pub const DEFAULT_NAME: &str = "default";

/// Resolves the store directory from the configured options.
///
/// Pure: performs no filesystem access.
pub fn resolve_directory(
    directory: Option<&Path>,
    base_directory: Option<&Path>,
    name: Option<&str>,
) -> PathBuf {
    if let Some(directory) = directory {
        return directory.to_path_buf();
    }

    let name = name.unwrap_or(DEFAULT_NAME);
    match base_directory {
        Some(base) => base.join(name),
        None => PathBuf::from(name),
    }
}

/// Rejects an explicit directory that exists as something other than a directory.
///
/// A path that does not exist yet is accepted; creating it is the engine's job.
pub fn check_explicit_directory(directory: &Path) -> StoreResult<()> {
    if directory.exists() && !directory.is_dir() {
        return Err(StoreError::InvalidDirectory(directory.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unconfigured_resolves_to_default() {
        assert_eq!(resolve_directory(None, None, None), PathBuf::from("default"));
    }

    #[test]
    fn test_bare_name_is_relative() {
        let dir = resolve_directory(None, None, Some("x"));
        assert_eq!(dir, PathBuf::from("x"));
        assert!(dir.is_relative());
    }

    #[test]
    fn test_base_and_name() {
        let dir = resolve_directory(None, Some(Path::new("/b")), Some("x"));
        assert_eq!(dir, PathBuf::from("/b/x"));
    }

    #[test]
    fn test_base_without_name_uses_default() {
        let dir = resolve_directory(None, Some(Path::new("/b")), None);
        assert_eq!(dir, PathBuf::from("/b/default"));
    }

    #[test]
    fn test_explicit_directory_wins() {
        let dir = resolve_directory(Some(Path::new("/d")), Some(Path::new("/b")), Some("x"));
        assert_eq!(dir, PathBuf::from("/d"));
    }

    #[test]
    fn test_check_accepts_missing_and_existing_dirs() {
        let temp_dir = TempDir::new().unwrap();
        assert!(check_explicit_directory(temp_dir.path()).is_ok());
        assert!(check_explicit_directory(&temp_dir.path().join("not-yet")).is_ok());
    }

    #[test]
    fn test_check_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data.mdb");
        fs::write(&file, b"not a directory").unwrap();

        let err = check_explicit_directory(&file).unwrap_err();
        assert_eq!(err.code(), "BOX_INVALID_DIRECTORY");
    }
}
