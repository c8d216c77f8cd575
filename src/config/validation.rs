//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the logging filter is a usable `EnvFilter` directive
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LocationConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::LocationConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("logging.filter must not be empty")]
    EmptyFilter,

    #[error("logging.filter {filter:?} is not a valid directive: {reason}")]
    InvalidFilter { filter: String, reason: String },
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &LocationConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.logging.filter.trim().is_empty() {
        errors.push(ValidationError::EmptyFilter);
    } else if let Err(e) = config.logging.env_filter() {
        errors.push(ValidationError::InvalidFilter {
            filter: config.logging.filter.clone(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
