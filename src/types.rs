//! Severity levels recognized by the fake.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Log severity attached to every captured entry.
///
/// The eight fixed variants mirror the syslog severities exposed as
/// dedicated logging methods. [`Level::Custom`] carries any other level
/// string passed through the generic `log`/`write` entry points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Error conditions.
    Error,
    /// Warning conditions.
    Warning,
    /// Normal but significant conditions.
    Notice,
    /// Informational messages.
    Info,
    /// Debug-level messages.
    Debug,
    /// Any level outside the fixed set.
    Custom(String),
}

impl Level {
    /// String form of the level, lowercase for the fixed set.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Custom(level) => level,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Level {
    fn from(value: &str) -> Self {
        match value {
            "emergency" => Self::Emergency,
            "alert" => Self::Alert,
            "critical" => Self::Critical,
            "error" => Self::Error,
            "warning" => Self::Warning,
            "notice" => Self::Notice,
            "info" => Self::Info,
            "debug" => Self::Debug,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Level> for String {
    fn from(value: Level) -> Self {
        match value {
            Level::Custom(level) => level,
            fixed => fixed.as_str().to_string(),
        }
    }
}
