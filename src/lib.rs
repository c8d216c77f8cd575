//! Caller-location codec for log records.
//!
//! Encodes where a log call happened as `Class.Method(File:Line)` and
//! decodes that form back, reporting `MalformedLocation` instead of
//! panicking on bad input.

pub mod config;
pub mod location;
pub mod observability;
pub mod record;

pub use config::LocationConfig;
pub use location::{decode, encode, LocationRecord, MalformedLocation};
pub use record::LogMessage;
