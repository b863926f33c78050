//! Bookchat Router - Route table and navigator for the Bookchat client.
//!
//! The route table maps path patterns such as `/books/:bookId` to named
//! views. It is built once, validated (unique names, a single root route,
//! view inputs matching forwarded parameters) and never mutated afterwards.
//! The [`Navigator`] owns the navigation state for one application
//! instance: it resolves URLs, navigates by name, keeps a back/forward
//! history and queues events for the rendering layer.
//!
//! # Example
//!
//! ```rust
//! use bookchat_router::{Navigator, ParamBindings, RouteTable};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Arc::new(RouteTable::builtin(false)?);
//! let mut navigator = Navigator::new(table);
//!
//! navigator.start("/")?;
//! navigator.navigate_to("bookDetail", ParamBindings::new().with("bookId", "42"))?;
//! assert_eq!(navigator.current_route().map(|r| r.name.as_str()), Some("bookDetail"));
//!
//! navigator.back();
//! assert_eq!(navigator.current_route().map(|r| r.name.as_str()), Some("main"));
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
pub mod history;
pub mod location;
pub mod navigator;
pub mod params;
pub mod pattern;
pub mod route;
pub mod state;
pub mod view;

pub use error::{Result, RouterError};
pub use history::History;
pub use location::Location;
pub use navigator::{
    Listener, NavigationEvent, NavigationKind, Navigator, ResolvedRoute, SubscriptionId,
};
pub use params::ParamBindings;
pub use pattern::{PathPattern, Segment};
pub use route::{builtin_definitions, RouteDefinition, RouteEntry, RouteTable, TableOptions};
pub use state::{NavigationState, NavigatorState, RouteSnapshot};
pub use view::{ViewCatalog, ViewDescriptor};
