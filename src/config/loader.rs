//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LocationConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LocationConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: LocationConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::MalformedPolicy;
    use std::path::PathBuf;

    fn temp_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("log-location-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let path = temp_config("[decode]\nmalformed = \"placeholder\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.decode.malformed, MalformedPolicy::Placeholder);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("log-location-does-not-exist.toml");
        assert!(matches!(load_config(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_parse_error() {
        let path = temp_config("[decode\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_validation_error() {
        let path = temp_config("[logging]\nfilter = \"\"\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("must not be empty"));
        fs::remove_file(path).unwrap();
    }
}
