//! Core error types for the Bookchat client.
//!
//! This module defines the central error type shared by all crates.
//! Each subsystem error is represented as a variant for clear error propagation.

use thiserror::Error;

/// Central error type for all Bookchat operations.
#[derive(Error, Debug)]
pub enum BookchatError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `BookchatError`.
pub type Result<T> = std::result::Result<T, BookchatError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookchatError::Validation("empty route name".to_string());
        assert_eq!(err.to_string(), "validation error: empty route name");

        let err = ConfigError::InvalidValue {
            field: "router.base".to_string(),
            reason: "must start with '/'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for router.base: must start with '/'"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let err: BookchatError = config_err.into();
        assert!(matches!(err, BookchatError::Config(_)));
    }
}
