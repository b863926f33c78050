//! Application shell: plugin installation and mounting.

use crate::error::ShellError;
use crate::state::AppState;
use bookchat_core::AppConfig;
use bookchat_icons::{IconLibrary, IconPrefix};
use bookchat_router::{
    Navigator, NavigatorState, RouteSnapshot, RouteTable, TableOptions,
};
use bookchat_store::StorePlugin;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Component registered globally by [`AppShell::from_config`].
pub const ICON_COMPONENT: &str = "FontAwesomeIcon";

/// Outcome of mounting the application.
#[derive(Debug, Clone, Serialize)]
pub struct MountReport {
    /// Display name of the site
    pub app_name: String,
    /// Selector the application was mounted on
    pub selector: String,
    /// Navigator state after resolving the initial URL
    pub state: NavigatorState,
    /// Active route, `None` when the initial URL matched nothing
    pub route: Option<RouteSnapshot>,
    /// View to render: the route's view, or the configured not-found view
    pub view: Option<String>,
}

/// Builder and owner of the application state.
pub struct AppShell {
    state: Arc<AppState>,
}

impl AppShell {
    /// Create a shell with nothing installed.
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Create a shell with the router, stores, icons and icon component
    /// described by `config`.
    ///
    /// The route table comes from `router.routes_file` when set, otherwise
    /// the built-in table validated against the built-in view catalog.
    pub fn from_config(config: AppConfig) -> Result<Self, ShellError> {
        config.validate()?;

        let table = match &config.router.routes_file {
            Some(path) => {
                info!(path = %path.display(), "loading route table");
                let options = TableOptions {
                    case_sensitive: config.router.case_sensitive,
                    catalog: None,
                };
                RouteTable::from_path(path, &options)?
            }
            None => RouteTable::builtin(config.router.case_sensitive)?,
        };
        let navigator = Navigator::with_config(Arc::new(table), &config.router);

        let stores = StorePlugin::from_config(&config)?;

        let prefixes = config
            .icons
            .packs
            .iter()
            .map(|p| p.parse::<IconPrefix>())
            .collect::<Result<Vec<_>, _>>()?;
        let icons = IconLibrary::with_builtin(&prefixes);

        Ok(Self::new(config)
            .use_router(navigator)
            .use_store_plugin(stores)
            .use_icons(icons)
            .component(ICON_COMPONENT))
    }

    /// Install the navigator.
    #[must_use]
    pub fn use_router(self, navigator: Navigator) -> Self {
        debug!(routes = navigator.table().len(), base = navigator.base(), "installing router");
        *self
            .state
            .navigator
            .write()
            .expect("RwLock poisoned: another thread panicked while holding the lock") =
            Some(navigator);
        self
    }

    /// Install the store plugin.
    #[must_use]
    pub fn use_store_plugin(self, plugin: StorePlugin) -> Self {
        debug!(default_scope = %plugin.default_scope(), "installing store plugin");
        *self
            .state
            .stores
            .write()
            .expect("RwLock poisoned: another thread panicked while holding the lock") =
            Some(Arc::new(plugin));
        self
    }

    /// Install the icon library.
    #[must_use]
    pub fn use_icons(self, library: IconLibrary) -> Self {
        debug!(icons = library.len(), "installing icon library");
        *self
            .state
            .icons
            .write()
            .expect("RwLock poisoned: another thread panicked while holding the lock") =
            Some(library);
        self
    }

    /// Register a component available to every view.
    #[must_use]
    pub fn component(self, name: &str) -> Self {
        let added = self
            .state
            .components
            .write()
            .expect("RwLock poisoned: another thread panicked while holding the lock")
            .insert(name.to_string());
        if !added {
            warn!(component = name, "component registered twice");
        }
        self
    }

    /// Shared state for command handlers.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Mount the application on `selector` and resolve `initial_url`.
    ///
    /// An initial URL that matches no route leaves the navigator in
    /// `NotFound`; it doesn't fail the mount.
    pub fn mount(&self, selector: &str, initial_url: &str) -> Result<MountReport, ShellError> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(ShellError::EmptySelector);
        }

        let mut mounted = self
            .state
            .mounted
            .write()
            .expect("RwLock poisoned: another thread panicked while holding the lock");
        if let Some(existing) = mounted.as_ref() {
            return Err(ShellError::AlreadyMounted(existing.clone()));
        }

        let (state, route) = self.state.with_navigator(|nav| {
            let started = nav.start(initial_url);
            nav.flush();
            started
                .map(|route| (nav.state().clone(), Some(route)))
                .or_else(|err| {
                    if err.is_navigation_error() {
                        warn!(url = initial_url, error = %err, "initial URL matches no route");
                        Ok((nav.state().clone(), None))
                    } else {
                        Err(err)
                    }
                })
        })??;

        *mounted = Some(selector.to_string());
        let view = active_view(&self.state, route.as_ref());
        info!(
            selector,
            url = initial_url,
            view = view.as_deref().unwrap_or("-"),
            "mounted application"
        );

        Ok(MountReport {
            app_name: self.state.config.general.app_name.clone(),
            selector: selector.to_string(),
            state,
            route,
            view,
        })
    }
}

/// View to render for the active route, falling back to
/// `router.not_found_view` when no route is active.
pub fn active_view(state: &AppState, route: Option<&RouteSnapshot>) -> Option<String> {
    match route {
        Some(route) => Some(route.view.to_string()),
        None => state.config.router.not_found_view.clone(),
    }
}
