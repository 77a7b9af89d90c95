//! Platform directory providers
//!
//! A platform context supplies an application-private files directory.
//! The store builder places its base directory beneath it.

use std::fmt;
use std::path::PathBuf;

use crate::store::BoxError;

/// Failure reported by a platform directory lookup
#[derive(Debug)]
pub struct PlatformLookupError {
    message: String,
    source: Option<BoxError>,
}

impl PlatformLookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PlatformLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for PlatformLookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Provider of a private files directory for an application.
///
/// `Ok(None)` means the platform has no files directory for this context.
pub trait PlatformContext {
    fn files_dir(&self) -> Result<Option<PathBuf>, PlatformLookupError>;
}

impl<F> PlatformContext for F
where
    F: Fn() -> Result<Option<PathBuf>, PlatformLookupError>,
{
    fn files_dir(&self) -> Result<Option<PathBuf>, PlatformLookupError> {
        self()
    }
}

/// Desktop platform context backed by the user's local data directory.
///
/// # Platform Behavior
/// Uses the `dirs` crate:
/// - **Linux**: `$XDG_DATA_HOME/<app>` or `~/.local/share/<app>`
/// - **Windows**: `%LOCALAPPDATA%\<app>`
/// - **macOS**: `~/Library/Application Support/<app>`
#[derive(Debug, Clone)]
pub struct UserDataContext {
    app_name: String,
}

impl UserDataContext {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

impl PlatformContext for UserDataContext {
    fn files_dir(&self) -> Result<Option<PathBuf>, PlatformLookupError> {
        if self.app_name.is_empty() || self.app_name.contains(['/', '\\']) {
            return Err(PlatformLookupError::new(format!(
                "Invalid application name: '{}'",
                self.app_name
            )));
        }
        Ok(dirs::data_local_dir().map(|dir| dir.join(&self.app_name)))
    }
}
