//! Error types for route table construction and navigation.

use bookchat_core::BookchatError;
use thiserror::Error;

/// Errors that can occur while building the route table or navigating.
#[derive(Error, Debug)]
pub enum RouterError {
    /// No route pattern matches the requested path
    #[error("no route matches path '{path}'")]
    NoMatch {
        /// Path as requested (after base stripping)
        path: String,
    },

    /// Programmatic navigation referenced an undefined route name
    #[error("unknown route '{name}'")]
    UnknownRoute {
        /// Name that was requested
        name: String,
    },

    /// A URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// URL as requested
        url: String,
        /// Parser error
        reason: String,
    },

    /// A parameter required by the route pattern was not supplied
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam {
        /// Route being navigated to
        route: String,
        /// Missing parameter name
        param: String,
    },

    /// A bound parameter could not be converted to the requested type
    #[error("invalid value '{value}' for parameter '{param}': {reason}")]
    InvalidParam {
        /// Parameter name
        param: String,
        /// Bound value
        value: String,
        /// Conversion failure
        reason: String,
    },

    /// Two routes share the same name
    #[error("duplicate route name '{name}'")]
    DuplicateRoute {
        /// Name declared twice
        name: String,
    },

    /// A path template is malformed
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Pattern as declared
        pattern: String,
        /// Reason for rejection
        reason: String,
    },

    /// More than one route matches the root path
    #[error("routes '{first}' and '{second}' both match the root path")]
    AmbiguousRoot {
        /// First root route
        first: String,
        /// Second root route
        second: String,
    },

    /// A route references a view missing from the catalog
    #[error("route '{route}' references unknown view '{view}'")]
    UnknownView {
        /// Route name
        route: String,
        /// View ID
        view: String,
    },

    /// Route parameters and the view's required inputs disagree
    #[error("route '{route}' binds {bound:?} but view '{view}' requires {required:?}")]
    ViewInputMismatch {
        /// Route name
        route: String,
        /// View ID
        view: String,
        /// Parameters forwarded by the route
        bound: Vec<String>,
        /// Inputs declared by the view
        required: Vec<String>,
    },

    /// Route name or view ID failed validation
    #[error("invalid route definition: {0}")]
    Definition(#[from] BookchatError),

    /// Failed to parse a declarative route table
    #[error("failed to parse route table TOML in {path}: {source}")]
    ParseError {
        /// Source of the table
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// I/O error while reading a route table
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RouterError {
    /// Whether the error comes from a navigation request rather than from
    /// building the table.
    #[must_use]
    pub fn is_navigation_error(&self) -> bool {
        matches!(
            self,
            Self::NoMatch { .. }
                | Self::InvalidUrl { .. }
                | Self::UnknownRoute { .. }
                | Self::MissingParam { .. }
                | Self::InvalidParam { .. }
        )
    }
}

/// Result type for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouterError::MissingParam {
            route: "bookDetail".to_string(),
            param: "bookId".to_string(),
        };
        assert_eq!(err.to_string(), "route 'bookDetail' requires parameter 'bookId'");

        let err = RouterError::NoMatch {
            path: "/nonexistent".to_string(),
        };
        assert_eq!(err.to_string(), "no route matches path '/nonexistent'");
    }

    #[test]
    fn test_navigation_error_classification() {
        assert!(RouterError::UnknownRoute {
            name: "doesNotExist".to_string()
        }
        .is_navigation_error());
        assert!(!RouterError::DuplicateRoute {
            name: "main".to_string()
        }
        .is_navigation_error());
    }
}
