//! Bookchat Icons - Icon registry for the Bookchat client.
//!
//! Icons are grouped in packs by prefix (`fas` solid, `far` regular,
//! `fab` brands). The [`IconLibrary`] resolves names and aliases and
//! renders icon markup for views.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod definition;
pub mod error;
pub mod library;
pub mod packs;

pub use definition::{IconDefinition, IconPrefix};
pub use error::{IconError, Result};
pub use library::IconLibrary;
pub use packs::IconPack;
