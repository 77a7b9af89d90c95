//! Structured JSON logger
//!
//! - One log line = one event
//! - Deterministic key ordering (`event`, `severity`, then fields sorted by key)
//! - Synchronous, no buffering, always to stderr
//! - Silent unless `BOXSTORE_LOG` names a level

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Environment variable selecting the minimum logged severity
pub const LOG_LEVEL_ENV: &str = "BOXSTORE_LOG";

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Parses a level name as accepted by `BOXSTORE_LOG`.
    ///
    /// Returns `Some(None)` for `off`, `None` for unrecognized input.
    pub fn parse_level(s: &str) -> Option<Option<Severity>> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Some(Severity::Trace)),
            "info" => Some(Some(Severity::Info)),
            "warn" => Some(Some(Severity::Warn)),
            "error" => Some(Some(Severity::Error)),
            "fatal" => Some(Some(Severity::Fatal)),
            "off" => Some(None),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimum severity, resolved once per process. `None` disables logging.
static MIN_SEVERITY: OnceLock<Option<Severity>> = OnceLock::new();

/// Level selected by a `BOXSTORE_LOG` value. Unset or unrecognized means off.
fn level_from_env(value: Option<&str>) -> Option<Severity> {
    value.and_then(Severity::parse_level).flatten()
}

fn min_severity() -> Option<Severity> {
    *MIN_SEVERITY.get_or_init(|| level_from_env(std::env::var(LOG_LEVEL_ENV).ok().as_deref()))
}

/// Quotes and escapes `s` as a JSON string literal
fn json_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Returns whether a record at `severity` would be written
    pub fn enabled(severity: Severity) -> bool {
        min_severity().map_or(false, |min| severity >= min)
    }

    /// Log an event with the given severity and fields.
    ///
    /// Records go to stderr; stdout belongs to the host application.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if Self::enabled(severity) {
            Self::log_to_writer(severity, event, fields, &mut io::stderr());
        }
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let line = Self::format_line(severity, event, fields);
        // Logging must never fail the caller
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// `event` and `severity` first, then fields sorted by key.
    fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut sorted = fields.to_vec();
        sorted.sort_by_key(|(key, _)| *key);

        let mut line = format!(
            "{{\"event\":{},\"severity\":\"{}\"",
            json_string(event),
            severity
        );
        for (key, value) in sorted {
            line.push(',');
            line.push_str(&json_string(key));
            line.push(':');
            line.push_str(&json_string(value));
        }
        line.push_str("}\n");
        line
    }
}

/// Capture a log line to a buffer, bypassing the level filter
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(Severity::parse_level("INFO"), Some(Some(Severity::Info)));
        assert_eq!(Severity::parse_level(" warn "), Some(Some(Severity::Warn)));
        assert_eq!(Severity::parse_level("off"), Some(None));
        assert_eq!(Severity::parse_level("loud"), None);
    }

    #[test]
    fn test_unset_env_disables_logging() {
        assert_eq!(level_from_env(None), None);
        assert_eq!(level_from_env(Some("verbose")), None);
        assert_eq!(level_from_env(Some("off")), None);
        assert_eq!(level_from_env(Some("warn")), Some(Severity::Warn));

        if std::env::var(LOG_LEVEL_ENV).is_err() {
            assert!(!Logger::enabled(Severity::Warn));
            assert!(!Logger::enabled(Severity::Fatal));
        }
    }

    #[test]
    fn test_log_json_format() {
        let output = capture_log(Severity::Info, "STORE_OPENED", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "STORE_OPENED");
        assert_eq!(parsed["severity"], "INFO");
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_fields_sorted() {
        let output = capture_log(
            Severity::Warn,
            "E",
            &[("zeta", "1"), ("alpha", "2"), ("mid", "3")],
        );
        let alpha = output.find("alpha").unwrap();
        let mid = output.find("mid").unwrap();
        let zeta = output.find("zeta").unwrap();
        assert!(alpha < mid && mid < zeta);
    }

    #[test]
    fn test_escaping() {
        let output = capture_log(
            Severity::Info,
            "E",
            &[("directory", "C:\\data\\\"quoted\"\n")],
        );
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["directory"], "C:\\data\\\"quoted\"\n");
    }
}
