//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LocationConfig {
    /// Diagnostic logging settings.
    pub logging: LoggingConfig,

    /// How stored locations are decoded.
    pub decode: DecodeConfig,
}

/// Output format of the `tracing` subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable, for terminals.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "log_location=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Build the filter from the configured directive, ignoring surrounding
    /// whitespace. Validation and subscriber setup both go through here.
    pub fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        EnvFilter::try_new(self.filter.trim())
    }
}

/// What to do with a stored record whose location string fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Keep the record, drop the location.
    #[default]
    Absent,
    /// Keep the record with `LocationRecord::unknown()` as its location.
    Placeholder,
    /// Drop the whole record.
    Discard,
}

/// Decode configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DecodeConfig {
    /// Policy applied to malformed location strings.
    pub malformed: MalformedPolicy,
}
