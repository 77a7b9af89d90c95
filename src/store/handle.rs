//! Engine boundary and live store handle
//!
//! The storage engine is an external collaborator. It receives a
//! [`ResolvedConfig`] and returns an [`EngineStore`], or fails with an
//! error this layer passes through untouched.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use super::errors::EngineError;
use crate::observability::{log_event_with_fields, Event};

/// Final store configuration handed to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    directory: PathBuf,
    max_size_kbytes: i64,
    model: Vec<u8>,
}

impl ResolvedConfig {
    pub fn new(directory: PathBuf, max_size_kbytes: i64, model: Vec<u8>) -> Self {
        Self {
            directory,
            max_size_kbytes,
            model,
        }
    }

    /// Directory the store lives in
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Maximum store size in kilobytes, unvalidated
    pub fn max_size_kbytes(&self) -> i64 {
        self.max_size_kbytes
    }

    /// Serialized schema model, opaque to this layer
    pub fn model(&self) -> &[u8] {
        &self.model
    }
}

/// A store opened by an engine
pub trait EngineStore: Send + Sync + fmt::Debug {
    /// Releases engine resources. Must be idempotent.
    fn close(&self);

    fn is_closed(&self) -> bool;
}

/// Factory for live stores
pub trait StoreEngine {
    fn open(&self, config: &ResolvedConfig) -> Result<Box<dyn EngineStore>, EngineError>;
}

/// Live store handle returned by a build
#[derive(Debug)]
pub struct BoxStore {
    config: ResolvedConfig,
    inner: Box<dyn EngineStore>,
}

impl BoxStore {
    pub(crate) fn new(config: ResolvedConfig, inner: Box<dyn EngineStore>) -> Self {
        Self { config, inner }
    }

    pub fn directory(&self) -> &Path {
        self.config.directory()
    }

    pub fn max_size_kbytes(&self) -> i64 {
        self.config.max_size_kbytes()
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// The engine-side store object
    pub fn engine_store(&self) -> &dyn EngineStore {
        self.inner.as_ref()
    }

    pub fn close(&self) {
        if self.inner.is_closed() {
            return;
        }
        self.inner.close();
        let directory = self.directory().display().to_string();
        log_event_with_fields(Event::StoreClosed, &[("directory", directory.as_str())]);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}
