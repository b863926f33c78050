//! Navigation commands.

use crate::error::CommandError;
use crate::shell::active_view;
use crate::state::AppState;
use bookchat_router::{Navigator, NavigatorState, ParamBindings, RouteSnapshot};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Navigation state reported after every navigation command.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationStatus {
    /// Navigator state
    pub state: NavigatorState,
    /// Active route and its bindings
    pub route: Option<RouteSnapshot>,
    /// Current URL including the base prefix
    pub url: Option<String>,
    /// View to render
    pub view: Option<String>,
    /// Whether `go_back` would move
    pub can_go_back: bool,
    /// Whether `go_forward` would move
    pub can_go_forward: bool,
}

/// Result of matching a URL without navigating.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedUrl {
    /// Matched route name
    pub name: String,
    /// View the route renders
    pub view: String,
    /// Parameter bindings
    pub params: ParamBindings,
}

fn status(state: &AppState, nav: &Navigator) -> NavigationStatus {
    let route = nav.current_route().cloned();
    NavigationStatus {
        state: nav.state().clone(),
        url: nav.current_location().map(|l| l.to_url(nav.base())),
        view: active_view(state, route.as_ref()),
        route,
        can_go_back: nav.history().can_go_back(),
        can_go_forward: nav.history().can_go_forward(),
    }
}

/// Run a navigation on the mounted navigator, deliver its events and
/// report the resulting status.
fn navigate<T>(
    state: &AppState,
    f: impl FnOnce(&mut Navigator) -> T,
) -> Result<(T, NavigationStatus), CommandError> {
    state.ensure_mounted()?;
    let outcome = state.with_navigator(|nav| {
        let outcome = f(nav);
        let delivered = nav.flush();
        debug!(delivered, "delivered navigation events");
        (outcome, status(state, nav))
    })?;
    Ok(outcome)
}

/// Navigate to a named route.
pub fn navigate_to(
    state: &AppState,
    name: String,
    params: BTreeMap<String, String>,
) -> Result<NavigationStatus, CommandError> {
    let params: ParamBindings = params.into_iter().collect();
    let (result, status) = navigate(state, |nav| nav.navigate_to(&name, params))?;
    result?;
    Ok(status)
}

/// Navigate to a URL, adding a history entry.
///
/// A URL matching no route still moves the navigator to `NotFound`; the
/// `NO_MATCH` error is returned so the caller can react.
pub fn push_url(state: &AppState, url: String) -> Result<NavigationStatus, CommandError> {
    let (result, status) = navigate(state, |nav| nav.push(&url))?;
    result?;
    Ok(status)
}

/// Navigate to a URL, overwriting the current history entry.
pub fn replace_url(state: &AppState, url: String) -> Result<NavigationStatus, CommandError> {
    let (result, status) = navigate(state, |nav| nav.replace(&url))?;
    result?;
    Ok(status)
}

/// Step back one history entry. No-op at the oldest entry.
pub fn go_back(state: &AppState) -> Result<NavigationStatus, CommandError> {
    navigate(state, Navigator::back).map(|(_, status)| status)
}

/// Step forward one history entry. No-op at the newest entry.
pub fn go_forward(state: &AppState) -> Result<NavigationStatus, CommandError> {
    navigate(state, Navigator::forward).map(|(_, status)| status)
}

/// Move `delta` entries through the history.
pub fn go(state: &AppState, delta: isize) -> Result<NavigationStatus, CommandError> {
    navigate(state, |nav| nav.go(delta)).map(|(_, status)| status)
}

/// Current navigation status.
pub fn current_route(state: &AppState) -> Result<NavigationStatus, CommandError> {
    state.ensure_mounted()?;
    Ok(state.with_navigator(|nav| status(state, nav))?)
}

/// URL of a named route.
pub fn href(
    state: &AppState,
    name: String,
    params: BTreeMap<String, String>,
) -> Result<String, CommandError> {
    let params: ParamBindings = params.into_iter().collect();
    Ok(state.with_navigator(|nav| nav.href(&name, &params))??)
}

/// Match a URL against the route table without navigating.
pub fn resolve_url(state: &AppState, url: String) -> Result<ResolvedUrl, CommandError> {
    let resolved = state.with_navigator(|nav| {
        nav.resolve(&url).map(|r| ResolvedUrl {
            name: r.entry.name().to_string(),
            view: r.entry.view().to_string(),
            params: r.params,
        })
    })??;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::AppShell;
    use bookchat_core::AppConfig;
    use bookchat_router::RouteTable;
    use std::sync::Arc;

    fn mounted() -> Arc<AppState> {
        let table = RouteTable::builtin(false).expect("builtin table");
        let shell = AppShell::new(AppConfig::default()).use_router(Navigator::new(Arc::new(table)));
        shell.mount("#app", "/").expect("mount");
        shell.state()
    }

    #[test]
    fn test_navigate_to_reports_status() {
        let state = mounted();
        let params = BTreeMap::from([("bookId".to_string(), "3".to_string())]);
        let status = navigate_to(&state, "bookDetail".to_string(), params).expect("navigate");

        assert_eq!(status.url.as_deref(), Some("/books/3"));
        assert_eq!(status.view.as_deref(), Some("BookDetailView"));
        assert!(status.can_go_back);
        assert!(!status.can_go_forward);
    }

    #[test]
    fn test_resolve_and_href_do_not_navigate() {
        let state = mounted();
        let resolved = resolve_url(&state, "/threads/7".to_string()).expect("resolve");
        assert_eq!(resolved.name, "threadDetail");
        assert_eq!(resolved.params.get("threadId"), Some("7"));

        let url = href(&state, "login".to_string(), BTreeMap::new()).expect("href");
        assert_eq!(url, "/login");

        let status = current_route(&state).expect("status");
        assert_eq!(status.route.map(|r| r.name.to_string()), Some("main".to_string()));
    }
}
