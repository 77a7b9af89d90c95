//! Local file-backed engine
//!
//! Prepares the store directory and its manifest. One engine instance
//! refuses to open the same directory twice until the first store is
//! closed or dropped.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use super::errors::{EngineOpenError, EngineResult};
use super::manifest::{StoreManifest, MANIFEST_FILE};
use crate::store::{EngineError, EngineStore, ResolvedConfig, StoreEngine};

type OpenDirectories = Arc<Mutex<HashSet<PathBuf>>>;

/// Engine storing each store in its own directory
#[derive(Debug, Clone, Default)]
pub struct LocalEngine {
    open: OpenDirectories,
}

impl LocalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a store at `directory` is currently open through this engine
    pub fn is_open(&self, directory: &Path) -> bool {
        let Ok(canonical) = directory.canonicalize() else {
            return false;
        };
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&canonical)
    }

    /// Opens or creates the store described by `config`.
    pub fn open_local(&self, config: &ResolvedConfig) -> EngineResult<LocalStore> {
        if config.max_size_kbytes() <= 0 {
            return Err(EngineOpenError::InvalidMaxSize(config.max_size_kbytes()));
        }

        let directory = config.directory();
        fs::create_dir_all(directory).map_err(|e| EngineOpenError::io(directory, e))?;
        let canonical = directory
            .canonicalize()
            .map_err(|e| EngineOpenError::io(directory, e))?;

        let mut open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        if open.contains(&canonical) {
            return Err(EngineOpenError::AlreadyOpen(canonical));
        }

        // An empty manifest is what an interrupted in-place write leaves
        // behind; it carries no identity, so the store is re-stamped.
        let manifest_path = canonical.join(MANIFEST_FILE);
        let has_manifest = fs::metadata(&manifest_path).map_or(false, |m| m.len() > 0);
        let manifest = if has_manifest {
            let mut manifest = StoreManifest::read_from_file(&manifest_path)?;
            manifest.reopen(config.max_size_kbytes(), config.model());
            manifest
        } else {
            StoreManifest::create(config.max_size_kbytes(), config.model())
        };
        manifest.write_to_file(&manifest_path)?;

        open.insert(canonical.clone());
        Ok(LocalStore {
            directory: canonical,
            store_id: manifest.store_id,
            closed: AtomicBool::new(false),
            open: Arc::clone(&self.open),
        })
    }
}

impl StoreEngine for LocalEngine {
    fn open(&self, config: &ResolvedConfig) -> Result<Box<dyn EngineStore>, EngineError> {
        Ok(Box::new(self.open_local(config)?))
    }
}

/// A store opened by [`LocalEngine`]
#[derive(Debug)]
pub struct LocalStore {
    directory: PathBuf,
    store_id: Uuid,
    closed: AtomicBool,
    open: OpenDirectories,
}

impl LocalStore {
    /// Canonical store directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Identity recorded in the store manifest
    pub fn store_id(&self) -> Uuid {
        self.store_id
    }
}

impl EngineStore for LocalStore {
    fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.directory);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Drop for LocalStore {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(directory: PathBuf, max_size_kbytes: i64) -> ResolvedConfig {
        ResolvedConfig::new(directory, max_size_kbytes, b"model".to_vec())
    }

    #[test]
    fn test_creates_directory_and_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a").join("b");

        let store = LocalEngine::new().open_local(&config(dir.clone(), 1024)).unwrap();
        assert!(dir.is_dir());
        assert!(dir.join(MANIFEST_FILE).is_file());
        assert!(!store.is_closed());
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let temp_dir = TempDir::new().unwrap();
        let engine = LocalEngine::new();

        for size in [0, -1] {
            let err = engine
                .open_local(&config(temp_dir.path().join("s"), size))
                .unwrap_err();
            assert!(matches!(err, EngineOpenError::InvalidMaxSize(s) if s == size));
        }
        assert!(!temp_dir.path().join("s").exists());
    }

    #[test]
    fn test_reopen_keeps_store_id() {
        let temp_dir = TempDir::new().unwrap();
        let engine = LocalEngine::new();
        let dir = temp_dir.path().join("s");

        let first = engine.open_local(&config(dir.clone(), 1024)).unwrap();
        let id = first.store_id();
        first.close();

        let second = engine.open_local(&config(dir, 2048)).unwrap();
        assert_eq!(second.store_id(), id);
    }

    #[test]
    fn test_empty_manifest_is_recreated() {
        let temp_dir = TempDir::new().unwrap();
        let engine = LocalEngine::new();
        let dir = temp_dir.path().join("s");

        engine.open_local(&config(dir.clone(), 1024)).unwrap().close();
        fs::write(dir.join(MANIFEST_FILE), b"").unwrap();

        let store = engine.open_local(&config(dir.clone(), 1024)).unwrap();
        let manifest = StoreManifest::read_from_file(&dir.join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.store_id, store.store_id());
        assert_eq!(manifest.max_size_kbytes, 1024);
    }

    #[test]
    fn test_corrupt_manifest_still_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("s");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), b"{\"store_id\":").unwrap();

        let err = LocalEngine::new().open_local(&config(dir, 1024)).unwrap_err();
        assert!(matches!(err, EngineOpenError::Manifest { .. }));
    }

    #[test]
    fn test_double_open_rejected_until_closed() {
        let temp_dir = TempDir::new().unwrap();
        let engine = LocalEngine::new();
        let dir = temp_dir.path().join("s");

        let first = engine.open_local(&config(dir.clone(), 1024)).unwrap();
        assert!(engine.is_open(&dir));
        assert!(matches!(
            engine.open_local(&config(dir.clone(), 1024)),
            Err(EngineOpenError::AlreadyOpen(_))
        ));

        drop(first);
        assert!(!engine.is_open(&dir));
        assert!(engine.open_local(&config(dir, 1024)).is_ok());
    }

    #[test]
    fn test_close_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalEngine::new()
            .open_local(&config(temp_dir.path().join("s"), 1))
            .unwrap();
        store.close();
        store.close();
        assert!(store.is_closed());
    }
}
