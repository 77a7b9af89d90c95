//! Observability for the store configuration layer
//!
//! Structured JSON logging of lifecycle events. Logging is read-only:
//! it never changes the outcome of the operation being observed.
//!
//! # Usage
//!
//! ```ignore
//! use boxstore::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::StoreOpened, &[("directory", "/data/default")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity, LOG_LEVEL_ENV};

/// Severity a lifecycle event is logged at
pub fn event_severity(event: Event) -> Severity {
    if event.is_failure() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event_severity(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}
