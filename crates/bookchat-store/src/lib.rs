//! Bookchat Store - Named, optionally persisted state for the Bookchat client.
//!
//! Views share state through named stores (`auth`, `books`). Each store
//! holds a JSON object; stores declared with [`PersistOptions`] write the
//! selected part of their state to `local` (file) or `session` (memory)
//! storage after every change and restore it when defined again.
//!
//! # Example
//!
//! ```rust
//! use bookchat_store::{PersistOptions, StoreDefinition, StorePlugin};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let plugin = StorePlugin::in_memory();
//! let auth = plugin.define(
//!     StoreDefinition::new("auth")
//!         .with_initial(&json!({ "token": null }))?
//!         .persisted(PersistOptions::default().paths(["token"])),
//! )?;
//!
//! auth.set("token", &"secret")?;
//! assert_eq!(auth.get_as::<String>("token")?, Some("secret".to_string()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod plugin;
pub mod storage;
pub mod store;

pub use error::{Result, StoreError};
pub use plugin::StorePlugin;
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageScope};
pub use store::{PersistOptions, StateStore, StoreDefinition};
