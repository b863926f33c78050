//! Error types for the icon library.

use thiserror::Error;

/// Errors that can occur when resolving icons.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IconError {
    /// No icon with this name in the pack
    #[error("icon '{name}' not found in pack '{prefix}'")]
    NotFound {
        /// Pack prefix
        prefix: String,
        /// Requested name
        name: String,
    },

    /// Unknown pack prefix or style class
    #[error("unknown icon prefix '{0}'")]
    UnknownPrefix(String),

    /// Icon string could not be parsed
    #[error("invalid icon spec '{spec}': {reason}")]
    InvalidSpec {
        /// Input string
        spec: String,
        /// Reason for rejection
        reason: String,
    },
}

/// Result type for icon operations.
pub type Result<T> = std::result::Result<T, IconError>;
