//! Views the route table may point at, with the inputs each one requires.

use crate::error::Result;
use bookchat_core::ViewId;
use std::collections::BTreeMap;

/// A view known to the shell and the inputs it expects from its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    /// View identifier
    pub id: ViewId,
    /// Inputs the view requires, forwarded from path parameters
    pub required_inputs: Vec<String>,
}

impl ViewDescriptor {
    /// Describe a view that takes no inputs.
    ///
    /// # Errors
    /// Returns error if `id` is not a valid view ID.
    pub fn new(id: &str) -> Result<Self> {
        Ok(Self {
            id: ViewId::new(id)?,
            required_inputs: Vec::new(),
        })
    }

    /// Add a required input.
    #[must_use]
    pub fn requires(mut self, input: impl Into<String>) -> Self {
        self.required_inputs.push(input.into());
        self
    }
}

/// Set of views, keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct ViewCatalog {
    views: BTreeMap<ViewId, ViewDescriptor>,
}

impl ViewCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The views of the book-discussion site.
    ///
    /// # Errors
    /// Never fails for the built-in IDs; the `Result` comes from ID validation.
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        for view in [
            ViewDescriptor::new("LandingView")?,
            ViewDescriptor::new("BooksListView")?,
            ViewDescriptor::new("BookDetailView")?.requires("bookId"),
            ViewDescriptor::new("ThreadsListView")?,
            ViewDescriptor::new("ThreadDetailView")?,
            ViewDescriptor::new("ThreadFormView")?,
            ViewDescriptor::new("MyPageView")?,
            ViewDescriptor::new("PasswordChangeView")?,
            ViewDescriptor::new("LoginView")?,
            ViewDescriptor::new("SignUpView")?,
        ] {
            catalog.register(view);
        }
        Ok(catalog)
    }

    /// Add or replace a view.
    pub fn register(&mut self, view: ViewDescriptor) {
        self.views.insert(view.id.clone(), view);
    }

    /// Look up a view.
    #[must_use]
    pub fn get(&self, id: &ViewId) -> Option<&ViewDescriptor> {
        self.views.get(id)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &ViewId) -> bool {
        self.views.contains_key(id)
    }

    /// Number of registered views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
