//! The navigator: resolves locations against the route table and drives
//! transitions between routes.
//!
//! All operations are synchronous state mutations. Observers are not called
//! from inside a navigation; each transition queues a [`NavigationEvent`]
//! that is delivered, in order, by the next [`Navigator::flush`] (the
//! rendering layer calls it once per render tick).

use crate::error::{Result, RouterError};
use crate::history::History;
use crate::location::{join_base, normalize_base, Location};
use crate::params::ParamBindings;
use crate::route::{RouteEntry, RouteTable};
use crate::state::{NavigationState, NavigatorState, RouteSnapshot};
use bookchat_core::{RouterConfig, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Callback invoked for every delivered navigation event.
pub type Listener = Box<dyn Fn(&NavigationEvent) + Send + Sync>;

/// Handle returned by [`Navigator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationKind {
    /// Initial resolution of the bootstrap URL
    Start,
    /// New history entry
    Push,
    /// Current history entry overwritten
    Replace,
    /// Cursor moved through existing entries
    Pop {
        /// Steps moved (negative = back)
        delta: isize,
    },
}

/// A completed transition, queued for observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    /// Cause of the transition
    pub kind: NavigationKind,
    /// Route active before, if any
    pub from: Option<RouteSnapshot>,
    /// Route active after; `None` means not found
    pub to: Option<RouteSnapshot>,
    /// Location after the transition
    pub location: Location,
}

/// Result of resolving a concrete URL.
#[derive(Debug, Clone)]
pub struct ResolvedRoute<'a> {
    /// Matching route
    pub entry: &'a RouteEntry,
    /// Bound path parameters
    pub params: ParamBindings,
    /// Parsed location
    pub location: Location,
}

impl ResolvedRoute<'_> {
    /// Owned snapshot of the resolved route.
    #[must_use]
    pub fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot::from_entry(self.entry, self.params.clone())
    }
}

/// Owns the navigation state for one application instance.
pub struct Navigator {
    table: Arc<RouteTable>,
    base: String,
    history_limit: usize,
    history: History,
    state: NavigatorState,
    listeners: Vec<(SubscriptionId, Listener)>,
    pending: VecDeque<NavigationEvent>,
    next_subscription: u64,
}

impl Navigator {
    /// Create a navigator over `table` with the root base and unbounded history.
    #[must_use]
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            base: String::new(),
            history_limit: 0,
            history: History::new(),
            state: NavigatorState::Uninitialized,
            listeners: Vec::new(),
            pending: VecDeque::new(),
            next_subscription: 0,
        }
    }

    /// Create a navigator using the router section of the app config.
    #[must_use]
    pub fn with_config(table: Arc<RouteTable>, config: &RouterConfig) -> Self {
        Self::new(table)
            .with_base(&config.base)
            .with_history_limit(config.history_limit)
    }

    /// Set the base prefix stripped before matching and added by [`Navigator::href`].
    #[must_use]
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = normalize_base(base);
        self
    }

    /// Cap the history stack (0 = unbounded).
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.history = History::with_limit(limit);
        self
    }

    /// The route table.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Normalised base prefix (empty for `/`).
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    /// History stack.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Match a concrete URL against the table without changing any state.
    ///
    /// The base prefix is stripped, query and hash are ignored for matching.
    ///
    /// # Errors
    /// Returns `InvalidUrl` if the URL cannot be parsed and `NoMatch` if no
    /// route pattern matches.
    pub fn resolve(&self, url: &str) -> Result<ResolvedRoute<'_>> {
        let location = Location::parse(url, &self.base)?;
        match self.table.find(&location.path) {
            Some((entry, params)) => Ok(ResolvedRoute {
                entry,
                params,
                location,
            }),
            None => Err(RouterError::NoMatch {
                path: location.path,
            }),
        }
    }

    /// Resolve the bootstrap URL. Calling it again resets the history.
    ///
    /// # Errors
    /// Returns `NoMatch` if the URL matches no route; the navigator is then
    /// in the `NotFound` state. A malformed URL (`InvalidUrl`) changes nothing.
    pub fn start(&mut self, url: &str) -> Result<RouteSnapshot> {
        let location = Location::parse(url, &self.base)?;
        self.history = History::with_limit(self.history_limit);
        self.visit(location, NavigationKind::Start)
    }

    /// Navigate to a concrete URL, adding a history entry.
    ///
    /// # Errors
    /// Returns `NoMatch` if the URL matches no route. The entry is still
    /// recorded and the navigator moves to `NotFound`. A malformed URL
    /// (`InvalidUrl`) records nothing.
    pub fn push(&mut self, url: &str) -> Result<RouteSnapshot> {
        let location = Location::parse(url, &self.base)?;
        self.visit(location, NavigationKind::Push)
    }

    /// Navigate to a concrete URL, overwriting the current history entry.
    ///
    /// # Errors
    /// Same as [`Navigator::push`].
    pub fn replace(&mut self, url: &str) -> Result<RouteSnapshot> {
        let location = Location::parse(url, &self.base)?;
        self.visit(location, NavigationKind::Replace)
    }

    /// Navigate to a named route.
    ///
    /// Parameters the pattern doesn't declare are dropped.
    ///
    /// # Errors
    /// Returns `UnknownRoute` if no route has that name and `MissingParam`
    /// if a declared parameter has no non-empty value. State is unchanged
    /// on error.
    pub fn navigate_to(&mut self, name: &str, params: ParamBindings) -> Result<RouteSnapshot> {
        let entry = self
            .table
            .get(name)
            .ok_or_else(|| RouterError::UnknownRoute {
                name: name.to_string(),
            })?;

        let path = entry
            .pattern()
            .build(&params)
            .map_err(|param| RouterError::MissingParam {
                route: name.to_string(),
                param,
            })?;

        let declared = entry.param_names();
        let params = params.retain_names(|n| declared.contains(&n));
        let snapshot = RouteSnapshot::from_entry(entry, params);

        let state = NavigationState {
            route: Some(snapshot.clone()),
            location: Location {
                path,
                ..Location::default()
            },
            visited_at: Timestamp::now(),
        };
        self.commit(NavigationKind::Push, state);

        Ok(snapshot)
    }

    /// Build the URL of a named route, including the base prefix.
    ///
    /// # Errors
    /// Returns `UnknownRoute` or `MissingParam` like [`Navigator::navigate_to`].
    pub fn href(&self, name: &str, params: &ParamBindings) -> Result<String> {
        let entry = self
            .table
            .get(name)
            .ok_or_else(|| RouterError::UnknownRoute {
                name: name.to_string(),
            })?;

        let path = entry
            .pattern()
            .build(params)
            .map_err(|param| RouterError::MissingParam {
                route: name.to_string(),
                param,
            })?;

        Ok(join_base(&self.base, &path))
    }

    /// Step back one entry. Returns `false` (no-op) at the oldest entry.
    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    /// Step forward one entry. Returns `false` (no-op) at the newest entry.
    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    /// Move the cursor by `delta` and re-activate the entry found there.
    ///
    /// Returns `false` without changing anything if the target lies outside
    /// the history.
    pub fn go(&mut self, delta: isize) -> bool {
        let from = self.current_route().cloned();

        let Some(target) = self.history.go(delta).cloned() else {
            return false;
        };

        let route = self.reactivate(&target);
        let location = target.location.clone();
        if let Some(current) = self.history.current_mut() {
            current.route = route.clone();
        }
        self.state = match &route {
            Some(snapshot) => NavigatorState::Resolved(snapshot.name.clone()),
            None => NavigatorState::NotFound(location.path.clone()),
        };

        self.pending.push_back(NavigationEvent {
            kind: NavigationKind::Pop { delta },
            from,
            to: route,
            location,
        });
        true
    }

    /// The active route and its bindings, if a route is active.
    #[must_use]
    pub fn current_route(&self) -> Option<&RouteSnapshot> {
        self.history.current().and_then(|entry| entry.route.as_ref())
    }

    /// The current location, once started.
    #[must_use]
    pub fn current_location(&self) -> Option<&Location> {
        self.history.current().map(|entry| &entry.location)
    }

    /// Register an observer for navigation events.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&NavigationEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Events queued since the last flush.
    pub fn pending_events(&self) -> impl Iterator<Item = &NavigationEvent> {
        self.pending.iter()
    }

    /// Deliver queued events to every observer, oldest first.
    ///
    /// Returns the number of events delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.pending.pop_front() {
            for (_, listener) in &self.listeners {
                listener(&event);
            }
            delivered += 1;
        }
        delivered
    }

    fn visit(&mut self, location: Location, kind: NavigationKind) -> Result<RouteSnapshot> {
        let route = self
            .table
            .find(&location.path)
            .map(|(entry, params)| RouteSnapshot::from_entry(entry, params));
        let path = location.path.clone();

        self.commit(
            kind,
            NavigationState {
                route: route.clone(),
                location,
                visited_at: Timestamp::now(),
            },
        );

        route.ok_or(RouterError::NoMatch { path })
    }

    fn commit(&mut self, kind: NavigationKind, state: NavigationState) {
        let from = self.current_route().cloned();
        let event = NavigationEvent {
            kind,
            from,
            to: state.route.clone(),
            location: state.location.clone(),
        };

        self.state = NavigatorState::of(&state);
        match kind {
            NavigationKind::Replace => self.history.replace(state),
            _ => self.history.push(state),
        }
        self.pending.push_back(event);
    }

    /// Re-resolve a history entry, preferring the route it was created for.
    fn reactivate(&self, entry: &NavigationState) -> Option<RouteSnapshot> {
        let path = &entry.location.path;

        if let Some(previous) = &entry.route {
            if let Some(route) = self.table.get(previous.name.as_str()) {
                if let Some(params) = route.pattern().matches(path) {
                    return Some(RouteSnapshot::from_entry(route, params));
                }
            }
        }

        self.table
            .find(path)
            .map(|(route, params)| RouteSnapshot::from_entry(route, params))
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("base", &self.base)
            .field("state", &self.state)
            .field("history_len", &self.history.len())
            .field("listeners", &self.listeners.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn navigator() -> Navigator {
        let table = RouteTable::builtin(false).expect("builtin table");
        Navigator::new(Arc::new(table))
    }

    fn current_name(nav: &Navigator) -> Option<&str> {
        nav.current_route().map(|r| r.name.as_str())
    }

    #[test]
    fn test_uninitialized_until_start() {
        let mut nav = navigator();
        assert_eq!(nav.state(), &NavigatorState::Uninitialized);
        assert!(nav.current_route().is_none());

        nav.start("/").expect("start at root");
        assert_eq!(current_name(&nav), Some("main"));
        assert!(matches!(nav.state(), NavigatorState::Resolved(name) if name.as_str() == "main"));
    }

    #[test]
    fn test_resolve_is_pure() {
        let nav = navigator();
        let resolved = nav.resolve("/threads/7?sort=new").expect("resolve");
        assert_eq!(resolved.entry.name().as_str(), "threadDetail");
        assert_eq!(resolved.params.get("threadId"), Some("7"));
        assert_eq!(resolved.location.query.get("sort").map(String::as_str), Some("new"));
        assert_eq!(nav.state(), &NavigatorState::Uninitialized);
    }

    #[test]
    fn test_resolve_strips_base() {
        let nav = navigator().with_base("/app/");
        let resolved = nav.resolve("/app/books/42").expect("resolve");
        assert_eq!(resolved.entry.name().as_str(), "bookDetail");

        let resolved = nav.resolve("/app").expect("resolve root under base");
        assert_eq!(resolved.entry.name().as_str(), "main");
    }

    #[test]
    fn test_push_no_match_enters_not_found() {
        let mut nav = navigator();
        nav.start("/books").expect("start");

        let err = nav.push("/nonexistent").unwrap_err();
        assert!(matches!(err, RouterError::NoMatch { ref path } if path == "/nonexistent"));
        assert_eq!(nav.state(), &NavigatorState::NotFound("/nonexistent".to_string()));
        assert!(nav.current_route().is_none());

        // Recoverable
        nav.push("/login").expect("push login");
        assert_eq!(current_name(&nav), Some("login"));
    }

    #[test]
    fn test_malformed_url_changes_nothing() {
        let mut nav = navigator();
        nav.start("/books").expect("start");

        let err = nav.push("http://[::1/books").unwrap_err();
        assert!(matches!(err, RouterError::InvalidUrl { .. }));
        assert!(err.is_navigation_error());
        assert!(nav.start("http://[::1").is_err());
        assert!(nav.replace("http://[::1").is_err());

        assert_eq!(current_name(&nav), Some("bookList"));
        assert_eq!(nav.history().len(), 1);
        assert_eq!(nav.pending_events().count(), 1);
    }

    #[test]
    fn test_navigate_to_builds_path() {
        let mut nav = navigator().with_base("/app");
        nav.start("/app/").expect("start");

        let snapshot = nav
            .navigate_to("threadForm", ParamBindings::new().with("bookId", "9"))
            .expect("navigate");
        assert_eq!(snapshot.name.as_str(), "threadForm");
        assert_eq!(
            nav.current_location().map(|l| l.path.as_str()),
            Some("/9/threads/form")
        );
    }

    #[test]
    fn test_navigate_to_drops_extra_params() {
        let mut nav = navigator();
        let snapshot = nav
            .navigate_to(
                "bookDetail",
                ParamBindings::new().with("bookId", "1").with("page", "2"),
            )
            .expect("navigate");
        assert_eq!(snapshot.params.names().collect::<Vec<_>>(), vec!["bookId"]);
    }

    #[test]
    fn test_navigate_to_errors_leave_state() {
        let mut nav = navigator();
        nav.start("/threads").expect("start");

        assert!(nav.navigate_to("bookDetail", ParamBindings::new()).is_err());
        assert!(nav.navigate_to("doesNotExist", ParamBindings::new()).is_err());
        assert_eq!(current_name(&nav), Some("threadList"));
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn test_back_forward() {
        let mut nav = navigator();
        nav.start("/").expect("start");
        nav.navigate_to("bookList", ParamBindings::new()).expect("navigate");

        assert!(nav.back());
        assert_eq!(current_name(&nav), Some("main"));
        assert!(!nav.back());
        assert_eq!(current_name(&nav), Some("main"));

        assert!(nav.forward());
        assert_eq!(current_name(&nav), Some("bookList"));
        assert!(!nav.forward());
    }

    #[test]
    fn test_back_into_not_found_entry() {
        let mut nav = navigator();
        nav.start("/missing").unwrap_err();
        nav.push("/books").expect("push");

        assert!(nav.back());
        assert_eq!(nav.state(), &NavigatorState::NotFound("/missing".to_string()));
    }

    #[test]
    fn test_replace_does_not_grow_history() {
        let mut nav = navigator();
        nav.start("/").expect("start");
        nav.replace("/login").expect("replace");

        assert_eq!(nav.history().len(), 1);
        assert_eq!(current_name(&nav), Some("login"));
        assert!(!nav.back());
    }

    #[test]
    fn test_href() {
        let nav = navigator().with_base("/forum/");
        let url = nav
            .href("bookDetail", &ParamBindings::new().with("bookId", "42"))
            .expect("href");
        assert_eq!(url, "/forum/books/42");
        assert_eq!(nav.href("main", &ParamBindings::new()).expect("href"), "/forum/");
        assert!(matches!(
            nav.href("threadDetail", &ParamBindings::new()),
            Err(RouterError::MissingParam { .. })
        ));
    }

    #[test]
    fn test_events_deferred_until_flush() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut nav = navigator();
        let sink = Arc::clone(&seen);
        nav.subscribe(move |event| {
            let name = event.to.as_ref().map(|r| r.name.to_string());
            sink.lock().expect("lock").push((event.kind, name));
        });

        nav.start("/").expect("start");
        nav.push("/books/3").expect("push");
        nav.back();
        assert!(seen.lock().expect("lock").is_empty());
        assert_eq!(nav.pending_events().count(), 3);

        assert_eq!(nav.flush(), 3);
        let seen = seen.lock().expect("lock");
        assert_eq!(
            *seen,
            vec![
                (NavigationKind::Start, Some("main".to_string())),
                (NavigationKind::Push, Some("bookDetail".to_string())),
                (NavigationKind::Pop { delta: -1 }, Some("main".to_string())),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut nav = navigator();
        let sink = Arc::clone(&count);
        let id = nav.subscribe(move |_| *sink.lock().expect("lock") += 1);

        assert!(nav.unsubscribe(id));
        assert!(!nav.unsubscribe(id));

        nav.start("/").expect("start");
        nav.flush();
        assert_eq!(*count.lock().expect("lock"), 0);
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = RouterConfig {
            history_limit: 2,
            ..RouterConfig::default()
        };
        let table = Arc::new(RouteTable::builtin(false).expect("builtin table"));
        let mut nav = Navigator::with_config(table, &config);

        nav.start("/").expect("start");
        nav.push("/books").expect("push");
        nav.push("/threads").expect("push");

        assert_eq!(nav.history().len(), 2);
        assert!(nav.back());
        assert_eq!(current_name(&nav), Some("bookList"));
        assert!(!nav.back());
    }
}
