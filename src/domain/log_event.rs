//! Structured log event model shipped to the remote collector.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::utils::time::iso_millis;

/// Stack label attached to every event emitted by this service.
pub const STACK: &str = "backend";

/// Severity of a shipped log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flat, fire-and-forget log record.
///
/// Serializes to the collector wire format:
///
/// ```json
/// {"stack":"backend","level":"info","package":"api","message":"...","timestamp":"2025-01-01T00:00:00.000Z"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    pub stack: String,
    pub level: LogLevel,
    pub package: String,
    pub message: String,
    #[serde(serialize_with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    /// Creates an event stamped with the current time.
    pub fn new(
        stack: impl Into<String>,
        level: LogLevel,
        package: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stack: stack.into(),
            level,
            package: package.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_serializes_lowercase() {
        assert_eq!(serde_json::to_value(LogLevel::Fatal).unwrap(), json!("fatal"));
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_event_wire_shape() {
        let event = LogEvent::new(STACK, LogLevel::Info, "api", "Health check requested");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["stack"], "backend");
        assert_eq!(value["level"], "info");
        assert_eq!(value["package"], "api");
        assert_eq!(value["message"], "Health check requested");

        let ts = value["timestamp"].as_str().unwrap();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2025-01-01T00:00:00.000Z".len());
    }
}
