//! Bookchat Core - Foundation crate for the Bookchat client.
//!
//! This crate provides the shared error type, configuration management and
//! validated identifier newtypes that the router, store, icon and shell
//! crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`RouteName`, `ViewId`, `Timestamp`)
//!
//! # Example
//!
//! ```rust
//! use bookchat_core::{AppConfig, RouteName};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.router.base, "/");
//!
//! let name = RouteName::new("bookDetail")?;
//! assert_eq!(name.as_str(), "bookDetail");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, GeneralConfig, IconConfig, RouterConfig, StoreConfig};
pub use error::{BookchatError, ConfigError, ConfigResult, Result};
pub use types::{RouteName, Timestamp, ViewId};
