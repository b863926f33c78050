//! The route table: an ordered, immutable list of route entries.
//!
//! Tables are built once at startup, either from the built-in site routes
//! or from a declarative TOML file:
//!
//! ```toml
//! [[routes]]
//! name = "bookDetail"
//! path = "/books/:bookId"
//! view = "BookDetailView"
//! props = true
//! ```

use crate::error::{Result, RouterError};
use crate::params::ParamBindings;
use crate::pattern::PathPattern;
use crate::view::ViewCatalog;
use bookchat_core::{RouteName, ViewId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info, warn};

/// Uncompiled route, as declared in code or TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Unique route name
    pub name: String,
    /// Path template
    pub path: String,
    /// View rendered for this route
    pub view: String,
    /// Forward path parameters to the view as inputs
    #[serde(default)]
    pub props: bool,
}

impl RouteDefinition {
    /// Declare a route without props.
    #[must_use]
    pub fn new(name: &str, path: &str, view: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            view: view.to_string(),
            props: false,
        }
    }

    /// Forward path parameters to the view.
    #[must_use]
    pub fn with_props(mut self) -> Self {
        self.props = true;
        self
    }
}

#[derive(Debug, Deserialize)]
struct RouteFile {
    #[serde(default)]
    routes: Vec<RouteDefinition>,
}

/// The routes of the book-discussion site, in declaration order.
#[must_use]
pub fn builtin_definitions() -> Vec<RouteDefinition> {
    vec![
        RouteDefinition::new("main", "/", "LandingView"),
        RouteDefinition::new("bookList", "/books", "BooksListView"),
        RouteDefinition::new("bookDetail", "/books/:bookId", "BookDetailView").with_props(),
        RouteDefinition::new("threadList", "/threads", "ThreadsListView"),
        RouteDefinition::new("threadDetail", "/threads/:threadId", "ThreadDetailView"),
        RouteDefinition::new("threadForm", "/:bookId/threads/form", "ThreadFormView"),
        RouteDefinition::new("myPage", "/mypage", "MyPageView"),
        RouteDefinition::new("passwordChange", "/mypage/password", "PasswordChangeView"),
        RouteDefinition::new("login", "/login", "LoginView"),
        RouteDefinition::new("signup", "/signup", "SignUpView"),
    ]
}

/// A compiled, validated route.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    name: RouteName,
    pattern: PathPattern,
    view: ViewId,
    props: bool,
}

impl RouteEntry {
    /// Route name.
    #[must_use]
    pub fn name(&self) -> &RouteName {
        &self.name
    }

    /// Compiled path template.
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// View rendered for this route.
    #[must_use]
    pub fn view(&self) -> &ViewId {
        &self.view
    }

    /// Whether path parameters are forwarded to the view.
    #[must_use]
    pub fn props_from_params(&self) -> bool {
        self.props
    }

    /// Parameter names declared by the pattern.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.pattern.param_names().collect()
    }
}

/// Options applied while building a table.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Match static segments case-sensitively
    pub case_sensitive: bool,
    /// Validate views and their inputs against this catalog
    pub catalog: Option<ViewCatalog>,
}

/// Ordered, immutable set of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_name: HashMap<RouteName, usize>,
}

impl RouteTable {
    /// Build a case-insensitive table without view validation.
    ///
    /// # Errors
    /// Returns error if any definition is invalid (see [`RouteTable::build`]).
    pub fn new(definitions: Vec<RouteDefinition>) -> Result<Self> {
        Self::build(definitions, &TableOptions::default())
    }

    /// Build the site's table, validated against the built-in view catalog.
    ///
    /// # Errors
    /// Returns error only if the built-in definitions are inconsistent.
    pub fn builtin(case_sensitive: bool) -> Result<Self> {
        let options = TableOptions {
            case_sensitive,
            catalog: Some(ViewCatalog::builtin()?),
        };
        Self::build(builtin_definitions(), &options)
    }

    /// Build a table from definitions.
    ///
    /// # Errors
    /// Returns error if:
    /// - a name or view ID is malformed, or a pattern doesn't compile
    /// - two routes share a name (`DuplicateRoute`)
    /// - two routes match the root path (`AmbiguousRoot`)
    /// - a view is missing from the catalog, or its required inputs differ
    ///   from the parameters the route forwards
    pub fn build(definitions: Vec<RouteDefinition>, options: &TableOptions) -> Result<Self> {
        let mut entries: Vec<RouteEntry> = Vec::with_capacity(definitions.len());
        let mut by_name = HashMap::with_capacity(definitions.len());
        let mut root: Option<RouteName> = None;

        for definition in definitions {
            let name = RouteName::new(definition.name)?;
            let view = ViewId::new(definition.view)?;
            let pattern = PathPattern::compile(&definition.path, options.case_sensitive)?;

            if by_name.contains_key(&name) {
                return Err(RouterError::DuplicateRoute {
                    name: name.to_string(),
                });
            }

            if pattern.is_root() {
                if let Some(first) = &root {
                    return Err(RouterError::AmbiguousRoot {
                        first: first.to_string(),
                        second: name.to_string(),
                    });
                }
                root = Some(name.clone());
            }

            let entry = RouteEntry {
                name,
                pattern,
                view,
                props: definition.props,
            };

            if let Some(catalog) = &options.catalog {
                check_view_inputs(&entry, catalog)?;
            }

            for earlier in &entries {
                if earlier.pattern.overlaps(&entry.pattern) {
                    warn!(
                        first = %earlier.name,
                        second = %entry.name,
                        "route patterns overlap, first declared wins"
                    );
                }
            }

            debug!(
                name = %entry.name,
                pattern = %entry.pattern,
                view = %entry.view,
                "registered route"
            );
            by_name.insert(entry.name.clone(), entries.len());
            entries.push(entry);
        }

        info!(count = entries.len(), "built route table");

        Ok(Self { entries, by_name })
    }

    /// Parse a TOML route table.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or the routes are invalid.
    pub fn from_toml_str(contents: &str, options: &TableOptions) -> Result<Self> {
        let file: RouteFile = toml::from_str(contents).map_err(|source| RouterError::ParseError {
            path: "<string>".to_string(),
            source,
        })?;
        Self::build(file.routes, options)
    }

    /// Load a TOML route table from disk.
    ///
    /// # Errors
    /// Returns error if the file can't be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>, options: &TableOptions) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let file: RouteFile = toml::from_str(&contents).map_err(|source| RouterError::ParseError {
            path: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), "loading route table");
        Self::build(file.routes, options)
    }

    /// First route whose pattern matches `path`, with its bindings.
    ///
    /// `path` must already have its base, query and hash removed.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<(&RouteEntry, ParamBindings)> {
        self.entries
            .iter()
            .find_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
    }

    /// Look up a route by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        let name = RouteName::new(name).ok()?;
        self.by_name.get(&name).map(|&index| &self.entries[index])
    }

    /// Whether a route named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_view_inputs(entry: &RouteEntry, catalog: &ViewCatalog) -> Result<()> {
    let view = catalog
        .get(&entry.view)
        .ok_or_else(|| RouterError::UnknownView {
            route: entry.name.to_string(),
            view: entry.view.to_string(),
        })?;

    let bound: BTreeSet<&str> = if entry.props {
        entry.pattern.param_names().collect()
    } else {
        BTreeSet::new()
    };
    let required: BTreeSet<&str> = view.required_inputs.iter().map(String::as_str).collect();

    if bound == required {
        Ok(())
    } else {
        Err(RouterError::ViewInputMismatch {
            route: entry.name.to_string(),
            view: entry.view.to_string(),
            bound: bound.into_iter().map(str::to_string).collect(),
            required: required.into_iter().map(str::to_string).collect(),
        })
    }
}
