//! Store configuration errors
//!
//! Every failure in this layer is synchronous and fail-fast. Engine
//! failures are carried verbatim in `StoreError::Engine`.

use std::path::PathBuf;

use thiserror::Error;

/// Type-erased error from a collaborator outside this layer
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error produced by a storage engine
pub type EngineError = BoxError;

/// Result type for store configuration and lifecycle operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store configuration and lifecycle errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Mutually exclusive options were combined
    #[error("Configuration conflict: {0}")]
    ConfigConflict(String),

    /// Store name contains a path separator
    #[error("Name may not contain (back) slashes: '{0}'; use base_directory() or directory()")]
    InvalidName(String),

    /// Explicit directory exists but is not a directory
    #[error("Given directory exists but is not a directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    /// Platform context lookup or base directory creation failed
    #[error("Could not init with given platform context: {message}")]
    PlatformContext {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A default store was already built
    #[error("Default store was already built before")]
    AlreadyInitialized,

    /// No default store has been built
    #[error("Please call build_default() before calling this method")]
    NotInitialized,

    /// Model bytes were missing
    #[error("Model may not be empty")]
    ModelRequired,

    /// Options file could not be read or parsed
    #[error("Store options error: {0}")]
    Options(String),

    /// Storage engine failed to open the store
    #[error(transparent)]
    Engine(EngineError),
}

impl StoreError {
    /// Create a platform context error without an underlying cause
    pub fn platform(message: impl Into<String>) -> Self {
        StoreError::PlatformContext {
            message: message.into(),
            source: None,
        }
    }

    /// Create a platform context error wrapping the lookup failure
    pub fn platform_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        StoreError::PlatformContext {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::ConfigConflict(_) => "BOX_CONFIG_CONFLICT",
            StoreError::InvalidName(_) => "BOX_INVALID_NAME",
            StoreError::InvalidDirectory(_) => "BOX_INVALID_DIRECTORY",
            StoreError::PlatformContext { .. } => "BOX_PLATFORM_CONTEXT",
            StoreError::AlreadyInitialized => "BOX_ALREADY_INITIALIZED",
            StoreError::NotInitialized => "BOX_NOT_INITIALIZED",
            StoreError::ModelRequired => "BOX_MODEL_REQUIRED",
            StoreError::Options(_) => "BOX_OPTIONS_ERROR",
            StoreError::Engine(_) => "BOX_ENGINE_FAILURE",
        }
    }

    /// Returns the engine error, if this failure came from the engine
    pub fn engine_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            StoreError::Engine(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
