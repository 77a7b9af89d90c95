//! Default store registry
//!
//! A single guarded slot: `Empty` or `Holding(handle)`. One mutex covers
//! `get`, `clear` and `build_and_register`, and is held across the build
//! itself, so concurrent default builds are totally ordered and at most
//! one of them installs a handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::errors::{StoreError, StoreResult};
use super::handle::BoxStore;
use crate::observability::{log_event, Event};

/// Process-wide default store
static DEFAULT_STORE: SingletonRegistry<BoxStore> = SingletonRegistry::new();

/// Guarded slot holding at most one shared value
#[derive(Debug)]
pub struct SingletonRegistry<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> SingletonRegistry<T> {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    // A panic inside a build leaves the slot untouched, so a poisoned
    // lock still guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the registered value.
    ///
    /// Fails with `NotInitialized` when the slot is empty.
    pub fn get(&self) -> StoreResult<Arc<T>> {
        self.lock().clone().ok_or(StoreError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    /// Empties the slot. Returns whether a value was present.
    pub fn clear(&self) -> bool {
        let existed = self.lock().take().is_some();
        if existed {
            log_event(Event::DefaultStoreCleared);
        }
        existed
    }

    /// Builds and installs a value if the slot is empty.
    ///
    /// The lock is held while `build` runs. A failed build installs nothing.
    pub fn build_and_register<F>(&self, build: F) -> StoreResult<Arc<T>>
    where
        F: FnOnce() -> StoreResult<T>,
    {
        let mut slot = self.lock();
        if slot.is_some() {
            log_event(Event::DefaultStoreRejected);
            return Err(StoreError::AlreadyInitialized);
        }

        let value = Arc::new(build()?);
        *slot = Some(Arc::clone(&value));
        log_event(Event::DefaultStoreInstalled);
        Ok(value)
    }
}

impl<T> Default for SingletonRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the default store built by `StoreBuilder::build_default`.
///
/// For testability, prefer passing a store handle through application
/// state over relying on this singleton.
pub fn default_store() -> StoreResult<Arc<BoxStore>> {
    DEFAULT_STORE.get()
}

/// Clears the default store. Returns whether one was set.
///
/// The store itself is not closed; other holders of the handle keep it.
pub fn clear_default_store() -> bool {
    DEFAULT_STORE.clear()
}

pub(crate) fn default_registry() -> &'static SingletonRegistry<BoxStore> {
    &DEFAULT_STORE
}
