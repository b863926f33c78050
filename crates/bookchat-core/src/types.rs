//! Shared types used across the Bookchat client.
//!
//! This module defines validated newtypes for the identifiers that flow
//! between the route table, the view catalog and the shell.

use crate::error::BookchatError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Symbolic name of a route, used for programmatic navigation.
///
/// Route names start with an ASCII letter and continue with letters,
/// digits, `_` or `-`, at most 64 characters (`bookDetail`, `password-change`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteName(String);

impl RouteName {
    /// Create a new `RouteName` from a string.
    ///
    /// # Errors
    /// Returns error if the name doesn't match the required format.
    pub fn new(name: impl Into<String>) -> Result<Self, BookchatError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(name: &str) -> Result<(), BookchatError> {
        static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = NAME_REGEX
            .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]{0,63}$").expect("valid regex"));

        if regex.is_match(name) {
            Ok(())
        } else {
            Err(BookchatError::Validation(format!(
                "invalid route name: must start with a letter and contain only letters, digits, '_' or '-', got '{name}'"
            )))
        }
    }
}

impl TryFrom<String> for RouteName {
    type Error = BookchatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RouteName> for String {
    fn from(name: RouteName) -> Self {
        name.0
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a view component (`LandingView`, `BookDetailView`).
///
/// View IDs are `PascalCase`: an uppercase ASCII letter followed by letters
/// and digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViewId(String);

impl ViewId {
    /// Create a new `ViewId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID is not `PascalCase`.
    pub fn new(id: impl Into<String>) -> Result<Self, BookchatError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), BookchatError> {
        static VIEW_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = VIEW_REGEX
            .get_or_init(|| Regex::new(r"^[A-Z][A-Za-z0-9]{0,63}$").expect("valid regex"));

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(BookchatError::Validation(format!(
                "invalid view ID: must be PascalCase, got '{id}'"
            )))
        }
    }
}

impl TryFrom<String> for ViewId {
    type Error = BookchatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ViewId> for String {
    fn from(id: ViewId) -> Self {
        id.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_name_valid() {
        for name in ["main", "bookDetail", "password-change", "thread_form", "a"] {
            assert!(RouteName::new(name).is_ok(), "Failed for: {name}");
        }
    }

    #[test]
    fn test_route_name_invalid() {
        let too_long = "a".repeat(65);
        let invalid = vec!["", "1books", "book detail", "/books", "-main", too_long.as_str()];

        for name in invalid {
            assert!(RouteName::new(name).is_err(), "Should fail for: {name}");
        }
    }

    #[test]
    fn test_view_id_valid() {
        let id = ViewId::new("BookDetailView").expect("valid view ID");
        assert_eq!(id.as_str(), "BookDetailView");
        assert_eq!(id.to_string(), "BookDetailView");
    }

    #[test]
    fn test_view_id_invalid() {
        for id in ["bookDetailView", "Book-Detail", "", "Book View"] {
            assert!(ViewId::new(id).is_err(), "Should fail for: {id}");
        }
    }

    #[test]
    fn test_route_name_deserialize_validates() {
        let name: RouteName = serde_json::from_str("\"threadList\"").expect("deserialize name");
        assert_eq!(name.as_str(), "threadList");

        let bad: Result<RouteName, _> = serde_json::from_str("\"thread list\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_timestamp_display_is_rfc3339() {
        let ts = Timestamp::now();
        let shown = DateTime::parse_from_rfc3339(&ts.to_string()).expect("RFC3339 display");

        let json = serde_json::to_value(ts).expect("serialize timestamp");
        let stored = json.as_str().expect("timestamp serializes as a string");
        let stored = DateTime::parse_from_rfc3339(stored).expect("RFC3339 JSON");
        assert_eq!(shown.timestamp(), stored.timestamp());
    }
}
