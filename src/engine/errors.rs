//! Local engine errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for local engine operations
pub type EngineResult<T> = Result<T, EngineOpenError>;

/// Failures opening a store with the local engine
#[derive(Debug, Error)]
pub enum EngineOpenError {
    #[error("Maximum store size must be positive, got {0} KB")]
    InvalidMaxSize(i64),

    #[error("Store at {} is already open", .0.display())]
    AlreadyOpen(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid store manifest at {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("Unsupported store format version {found} (expected {expected})")]
    UnsupportedFormat { found: u8, expected: u8 },
}

impl EngineOpenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EngineOpenError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        EngineOpenError::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            EngineOpenError::InvalidMaxSize(0).to_string(),
            "Maximum store size must be positive, got 0 KB"
        );
        let err = EngineOpenError::io("/x", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.to_string().contains("/x"));
        assert!(err.to_string().contains("gone"));
    }
}
