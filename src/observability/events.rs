//! Observable store lifecycle events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events emitted by the configuration layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Options
    /// Options file loaded
    OptionsLoaded,

    // Platform
    /// Platform base directory could not be created
    PlatformBaseDirCreateFailed,
    /// Platform base directory verified and adopted
    PlatformBaseDirReady,

    // Build
    /// Terminal build begins
    StoreBuildBegin,
    /// Final directory resolved
    StoreDirectoryResolved,
    /// Engine returned a live handle
    StoreOpened,
    /// Engine refused to open the store
    StoreOpenFailed,
    /// Store handle closed
    StoreClosed,

    // Default store
    /// Default store installed into the registry
    DefaultStoreInstalled,
    /// Default store build rejected, one already exists
    DefaultStoreRejected,
    /// Default store cleared
    DefaultStoreCleared,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::OptionsLoaded => "STORE_OPTIONS_LOADED",

            Event::PlatformBaseDirCreateFailed => "PLATFORM_BASE_DIR_CREATE_FAILED",
            Event::PlatformBaseDirReady => "PLATFORM_BASE_DIR_READY",

            Event::StoreBuildBegin => "STORE_BUILD_BEGIN",
            Event::StoreDirectoryResolved => "STORE_DIRECTORY_RESOLVED",
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreOpenFailed => "STORE_OPEN_FAILED",
            Event::StoreClosed => "STORE_CLOSED",

            Event::DefaultStoreInstalled => "DEFAULT_STORE_INSTALLED",
            Event::DefaultStoreRejected => "DEFAULT_STORE_REJECTED",
            Event::DefaultStoreCleared => "DEFAULT_STORE_CLEARED",
        }
    }

    /// Whether this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::PlatformBaseDirCreateFailed
                | Event::StoreOpenFailed
                | Event::DefaultStoreRejected
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::StoreOpened.as_str(), "STORE_OPENED");
        assert_eq!(Event::DefaultStoreInstalled.to_string(), "DEFAULT_STORE_INSTALLED");
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::StoreOpenFailed.is_failure());
        assert!(Event::PlatformBaseDirCreateFailed.is_failure());
        assert!(!Event::StoreOpened.is_failure());
        assert!(!Event::DefaultStoreCleared.is_failure());
    }
}
