//! Error types for the shell and its command handlers.

use bookchat_core::ConfigError;
use bookchat_icons::IconError;
use bookchat_router::RouterError;
use bookchat_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while assembling or mounting the shell.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Mount target selector is blank
    #[error("mount selector must not be empty")]
    EmptySelector,

    /// The shell was already mounted
    #[error("application is already mounted on '{0}'")]
    AlreadyMounted(String),

    /// A command ran before the shell was mounted
    #[error("application is not mounted")]
    NotMounted,

    /// No navigator was installed with `use_router`
    #[error("no router installed")]
    NoRouter,

    /// No store plugin was installed with `use_store_plugin`
    #[error("no store plugin installed")]
    NoStorePlugin,

    /// No icon library was installed with `use_icons`
    #[error("no icon library installed")]
    NoIcons,

    /// Route table or navigation error
    #[error(transparent)]
    Router(#[from] RouterError),

    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Icon error
    #[error(transparent)]
    Icon(#[from] IconError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Serializable error returned by command handlers.
#[derive(Debug, Serialize)]
pub struct CommandError {
    /// Error code for frontend handling (e.g., "NO_MATCH")
    pub code: String,
    /// User-friendly error message
    pub message: String,
    /// Optional structured context
    pub details: Option<serde_json::Value>,
}

impl CommandError {
    /// Create a new command error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a command error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

impl From<RouterError> for CommandError {
    fn from(err: RouterError) -> Self {
        let message = err.to_string();
        match err {
            RouterError::NoMatch { path } => {
                Self::with_details("NO_MATCH", message, serde_json::json!({ "path": path }))
            }
            RouterError::InvalidUrl { url, .. } => {
                Self::with_details("INVALID_URL", message, serde_json::json!({ "url": url }))
            }
            RouterError::UnknownRoute { name } => {
                Self::with_details("UNKNOWN_ROUTE", message, serde_json::json!({ "name": name }))
            }
            RouterError::MissingParam { route, param } => Self::with_details(
                "MISSING_PARAM",
                message,
                serde_json::json!({ "route": route, "param": param }),
            ),
            RouterError::InvalidParam { param, .. } => {
                Self::with_details("INVALID_PARAM", message, serde_json::json!({ "param": param }))
            }
            RouterError::Io(_) => Self::new("FILESYSTEM_ERROR", message),
            _ => Self::new("ROUTE_TABLE_ERROR", message),
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::InvalidKey { key, .. } => {
                let details = serde_json::json!({ "key": key });
                Self::with_details("INVALID_STORAGE_KEY", message, details)
            }
            StoreError::NotAnObject { store } => {
                Self::with_details("INVALID_STATE", message, serde_json::json!({ "store": store }))
            }
            StoreError::UnknownScope(_) => Self::new("UNKNOWN_STORAGE_SCOPE", message),
            StoreError::NoBackend(_) => Self::new("NO_STORAGE_BACKEND", message),
            StoreError::Serialization(_) => Self::new("SERIALIZATION_ERROR", message),
            StoreError::Config(_) => Self::new("CONFIG_ERROR", message),
            StoreError::Io(_) => Self::new("FILESYSTEM_ERROR", message),
        }
    }
}

impl From<IconError> for CommandError {
    fn from(err: IconError) -> Self {
        let message = err.to_string();
        match err {
            IconError::NotFound { prefix, name } => Self::with_details(
                "ICON_NOT_FOUND",
                message,
                serde_json::json!({ "prefix": prefix, "name": name }),
            ),
            IconError::UnknownPrefix(_) => Self::new("UNKNOWN_ICON_PREFIX", message),
            IconError::InvalidSpec { .. } => Self::new("INVALID_ICON_SPEC", message),
        }
    }
}

impl From<ShellError> for CommandError {
    fn from(err: ShellError) -> Self {
        match err {
            ShellError::Router(e) => e.into(),
            ShellError::Store(e) => e.into(),
            ShellError::Icon(e) => e.into(),
            ShellError::Config(e) => Self::new("CONFIG_ERROR", e.to_string()),
            ShellError::EmptySelector => Self::new("INVALID_SELECTOR", err.to_string()),
            ShellError::AlreadyMounted(ref selector) => Self::with_details(
                "ALREADY_MOUNTED",
                err.to_string(),
                serde_json::json!({ "selector": selector }),
            ),
            ShellError::NotMounted => Self::new("NOT_MOUNTED", err.to_string()),
            ShellError::NoRouter => Self::new("NO_ROUTER", err.to_string()),
            ShellError::NoStorePlugin => Self::new("NO_STORE_PLUGIN", err.to_string()),
            ShellError::NoIcons => Self::new("NO_ICON_LIBRARY", err.to_string()),
        }
    }
}
