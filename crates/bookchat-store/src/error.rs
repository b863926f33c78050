//! Error types for persisted state.

use thiserror::Error;

/// Errors that can occur in store and storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage key cannot be used by the backend
    #[error("invalid storage key '{key}': {reason}")]
    InvalidKey {
        /// Offending key
        key: String,
        /// Reason for rejection
        reason: String,
    },

    /// Store or persisted document is not a JSON object
    #[error("state of store '{store}' must be a JSON object")]
    NotAnObject {
        /// Store ID
        store: String,
    },

    /// Unknown storage scope name
    #[error("unknown storage scope '{0}' (expected 'local' or 'session')")]
    UnknownScope(String),

    /// No backend is installed for a scope
    #[error("no storage backend for scope '{0}'")]
    NoBackend(String),

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error (store directory)
    #[error("configuration error: {0}")]
    Config(#[from] bookchat_core::ConfigError),

    /// I/O error in a file backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
