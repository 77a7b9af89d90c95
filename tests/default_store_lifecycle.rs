//! Default Store Lifecycle Tests
//!
//! The default store slot is process-wide, so every test here takes
//! `serial()` first and starts from an empty slot.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use boxstore::engine::LocalEngine;
use boxstore::store::{
    clear_default_store, default_store, EngineError, EngineStore, ResolvedConfig, StoreBuilder,
    StoreEngine, StoreError,
};
use tempfile::TempDir;

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    clear_default_store();
    guard
}

fn builder_in(dir: PathBuf) -> StoreBuilder {
    let mut builder = StoreBuilder::new(b"model".to_vec()).unwrap();
    builder.directory(dir).unwrap();
    builder
}

struct BrokenEngine;

impl StoreEngine for BrokenEngine {
    fn open(&self, _config: &ResolvedConfig) -> Result<Box<dyn EngineStore>, EngineError> {
        Err(Box::new(io::Error::new(io::ErrorKind::Other, "engine unavailable")))
    }
}

#[test]
fn test_get_before_build_fails() {
    let _guard = serial();
    assert!(matches!(default_store(), Err(StoreError::NotInitialized)));
}

#[test]
fn test_clear_on_empty_returns_false() {
    let _guard = serial();
    assert!(!clear_default_store());
}

#[test]
fn test_build_default_twice() {
    let _guard = serial();
    let temp_dir = TempDir::new().unwrap();
    let engine = LocalEngine::new();

    let first = builder_in(temp_dir.path().join("first"))
        .build_default(&engine)
        .unwrap();

    let err = builder_in(temp_dir.path().join("second"))
        .build_default(&engine)
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyInitialized));
    // The rejected build never reached the engine
    assert!(!temp_dir.path().join("second").exists());

    let current = default_store().unwrap();
    assert!(Arc::ptr_eq(&first, &current));
}

#[test]
fn test_clear_after_build() {
    let _guard = serial();
    let temp_dir = TempDir::new().unwrap();

    builder_in(temp_dir.path().join("s"))
        .build_default(&LocalEngine::new())
        .unwrap();

    assert!(clear_default_store());
    assert!(matches!(default_store(), Err(StoreError::NotInitialized)));
    assert!(!clear_default_store());
}

#[test]
fn test_cleared_handle_stays_usable() {
    let _guard = serial();
    let temp_dir = TempDir::new().unwrap();

    let store = builder_in(temp_dir.path().join("s"))
        .build_default(&LocalEngine::new())
        .unwrap();
    clear_default_store();

    assert!(!store.is_closed());
    assert_eq!(store.directory(), temp_dir.path().join("s").as_path());
}

#[test]
fn test_failed_build_installs_nothing() {
    let _guard = serial();

    let err = builder_in(PathBuf::from("/unused"))
        .build_default(&BrokenEngine)
        .unwrap_err();
    assert_eq!(err.to_string(), "engine unavailable");
    assert!(matches!(default_store(), Err(StoreError::NotInitialized)));
}

#[test]
fn test_rebuild_after_clear() {
    let _guard = serial();
    let temp_dir = TempDir::new().unwrap();
    let engine = LocalEngine::new();

    let first = builder_in(temp_dir.path().join("a"))
        .build_default(&engine)
        .unwrap();
    assert!(clear_default_store());

    let second = builder_in(temp_dir.path().join("b"))
        .build_default(&engine)
        .unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&second, &default_store().unwrap()));
}
