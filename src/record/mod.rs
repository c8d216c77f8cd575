//! Log record container.
//!
//! # Data Flow
//! ```text
//! LogMessage::create + with_* setters
//!     → to_json (location embedded as canonical string)
//!     → stored / transmitted
//!     → rehydrate(json, MalformedPolicy)
//!     → Some(LogMessage) | None (discarded) | RecordError
//! ```
//!
//! # Design Decisions
//! - Passive data: the only logic is delegating to the location codec
//! - Field enumeration is an explicit compile-time table, not reflection
//! - A malformed location never fails rehydration; the policy decides

pub mod level;
pub mod message;

pub use level::{LogLevel, LogMessageType};
pub use message::LogMessage;

use thiserror::Error;

/// Errors raised while converting log records to or from text.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The stored text is not valid JSON for a log message.
    #[error("invalid log record JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The `location` field holds something other than a string or null.
    #[error("location field must be a string, found {0}")]
    LocationNotText(String),
}
