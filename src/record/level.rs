//! Severity and classification enumerations.

use serde::{Deserialize, Serialize};

/// Severity of a log message. Higher values are more severe.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> Self {
        level as i32
    }
}

/// Audience of a log message.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMessageType {
    /// Development diagnostics.
    Dev = 0,
    /// Technical/operational events.
    Technical = 1,
    /// Business-level events.
    Business = 2,
}
