//! Application state management.

use crate::error::ShellError;
use bookchat_core::AppConfig;
use bookchat_icons::IconLibrary;
use bookchat_router::Navigator;
use bookchat_store::{StateStore, StorePlugin};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// State shared by the shell and every command handler.
pub struct AppState {
    /// Loaded configuration
    pub config: AppConfig,

    /// Navigator installed with `use_router`
    pub navigator: RwLock<Option<Navigator>>,

    /// Store plugin installed with `use_store_plugin`
    pub stores: RwLock<Option<Arc<StorePlugin>>>,

    /// Icon library installed with `use_icons`
    pub icons: RwLock<Option<IconLibrary>>,

    /// Globally registered component names
    pub components: RwLock<BTreeSet<String>>,

    /// Selector the application is mounted on
    pub mounted: RwLock<Option<String>>,
}

impl AppState {
    /// Create empty state for `config`.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            navigator: RwLock::new(None),
            stores: RwLock::new(None),
            icons: RwLock::new(None),
            components: RwLock::new(BTreeSet::new()),
            mounted: RwLock::new(None),
        }
    }

    /// Whether the application has been mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
            .read()
            .expect("RwLock poisoned: another thread panicked while holding the lock")
            .is_some()
    }

    /// Fail with `NotMounted` unless mounted.
    pub fn ensure_mounted(&self) -> Result<(), ShellError> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(ShellError::NotMounted)
        }
    }

    /// Run `f` with the navigator.
    pub fn with_navigator<T>(
        &self,
        f: impl FnOnce(&mut Navigator) -> T,
    ) -> Result<T, ShellError> {
        let mut guard = self
            .navigator
            .write()
            .expect("RwLock poisoned: another thread panicked while holding the lock");
        let navigator = guard.as_mut().ok_or(ShellError::NoRouter)?;
        Ok(f(navigator))
    }

    /// The store plugin.
    pub fn store_plugin(&self) -> Result<Arc<StorePlugin>, ShellError> {
        self.stores
            .read()
            .expect("RwLock poisoned: another thread panicked while holding the lock")
            .clone()
            .ok_or(ShellError::NoStorePlugin)
    }

    /// A defined store, if any.
    pub fn store(&self, id: &str) -> Result<Option<Arc<StateStore>>, ShellError> {
        Ok(self.store_plugin()?.store(id))
    }

    /// Run `f` with the icon library.
    pub fn with_icons<T>(&self, f: impl FnOnce(&IconLibrary) -> T) -> Result<T, ShellError> {
        let guard = self
            .icons
            .read()
            .expect("RwLock poisoned: another thread panicked while holding the lock");
        let icons = guard.as_ref().ok_or(ShellError::NoIcons)?;
        Ok(f(icons))
    }

    /// Whether a global component is registered.
    pub fn has_component(&self, name: &str) -> bool {
        self.components
            .read()
            .expect("RwLock poisoned: another thread panicked while holding the lock")
            .contains(name)
    }
}
