//! Store registry installed into the application shell.

use crate::error::{Result, StoreError};
use crate::storage::{FileStorage, MemoryStorage, StorageBackend, StorageScope};
use crate::store::{StateStore, StoreDefinition};
use bookchat_core::AppConfig;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Owns the storage backends and every defined store.
///
/// Stores are created once per ID; defining an ID again returns the
/// store that already exists.
#[derive(Debug)]
pub struct StorePlugin {
    backends: HashMap<StorageScope, Arc<dyn StorageBackend>>,
    default_scope: StorageScope,
    stores: RwLock<BTreeMap<String, Arc<StateStore>>>,
}

impl StorePlugin {
    /// Create a plugin with no backends.
    #[must_use]
    pub fn new(default_scope: StorageScope) -> Self {
        Self {
            backends: HashMap::new(),
            default_scope,
            stores: RwLock::new(BTreeMap::new()),
        }
    }

    /// Plugin whose `local` and `session` scopes both live in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(StorageScope::Local)
            .with_backend(StorageScope::Local, Arc::new(MemoryStorage::new()))
            .with_backend(StorageScope::Session, Arc::new(MemoryStorage::new()))
    }

    /// Plugin with `local` storage in `dir` and in-memory `session` storage.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn with_dir(dir: impl Into<PathBuf>, default_scope: StorageScope) -> Result<Self> {
        let local = FileStorage::new(dir)?;
        Ok(Self::new(default_scope)
            .with_backend(StorageScope::Local, Arc::new(local))
            .with_backend(StorageScope::Session, Arc::new(MemoryStorage::new())))
    }

    /// Plugin configured from the `[store]` section.
    ///
    /// # Errors
    /// Returns error if the scope name is unknown, the data directory
    /// cannot be determined, or it cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let default_scope: StorageScope = config.store.default_storage.parse()?;
        let dir = config.store_dir()?;
        info!(dir = %dir.display(), default_scope = %default_scope, "initializing store plugin");
        Self::with_dir(dir, default_scope)
    }

    /// Install or replace the backend for a scope.
    #[must_use]
    pub fn with_backend(mut self, scope: StorageScope, backend: Arc<dyn StorageBackend>) -> Self {
        self.backends.insert(scope, backend);
        self
    }

    /// Scope used by stores that don't name one.
    #[must_use]
    pub fn default_scope(&self) -> StorageScope {
        self.default_scope
    }

    /// Backend for a scope.
    #[must_use]
    pub fn backend(&self, scope: StorageScope) -> Option<Arc<dyn StorageBackend>> {
        self.backends.get(&scope).cloned()
    }

    /// Define a store and hydrate it from storage.
    ///
    /// # Errors
    /// Returns `NoBackend` if the store persists to a scope without a
    /// backend, or a storage error from hydration.
    pub fn define(&self, definition: StoreDefinition) -> Result<Arc<StateStore>> {
        let mut stores = self.stores.write().expect("stores lock poisoned");
        if let Some(existing) = stores.get(&definition.id) {
            debug!(store = %definition.id, "store already defined");
            return Ok(Arc::clone(existing));
        }

        let backend = match &definition.persist {
            Some(options) => {
                let scope = options.storage.unwrap_or(self.default_scope);
                let backend = self
                    .backend(scope)
                    .ok_or_else(|| StoreError::NoBackend(scope.to_string()))?;
                Some((scope, backend))
            }
            None => None,
        };

        let id = definition.id.clone();
        let store = Arc::new(StateStore::new(definition, backend));
        let hydrated = store.hydrate()?;
        info!(store = %id, persisted = store.storage_key().is_some(), hydrated, "defined store");

        stores.insert(id, Arc::clone(&store));
        Ok(store)
    }

    /// Look up a defined store.
    #[must_use]
    pub fn store(&self, id: &str) -> Option<Arc<StateStore>> {
        self.stores
            .read()
            .expect("stores lock poisoned")
            .get(id)
            .cloned()
    }

    /// IDs of all defined stores, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.stores
            .read()
            .expect("stores lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PersistOptions;
    use serde_json::json;

    #[test]
    fn test_define_returns_existing_store() {
        let plugin = StorePlugin::in_memory();
        let first = plugin
            .define(StoreDefinition::new("ui"))
            .expect("define store");
        first.set("sidebar", &true).expect("set");

        let second = plugin
            .define(StoreDefinition::new("ui"))
            .expect("define again");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.get("sidebar"), Some(json!(true)));
        assert_eq!(plugin.ids(), vec!["ui".to_string()]);
    }

    #[test]
    fn test_define_without_backend() {
        let plugin = StorePlugin::new(StorageScope::Local);
        let err = plugin
            .define(StoreDefinition::new("auth").persisted(PersistOptions::default()))
            .unwrap_err();
        assert!(matches!(err, StoreError::NoBackend(ref scope) if scope == "local"));

        // Non-persisted stores need no backend
        assert!(plugin.define(StoreDefinition::new("ui")).is_ok());
    }

    #[test]
    fn test_store_uses_requested_scope() {
        let plugin = StorePlugin::in_memory();
        let store = plugin
            .define(
                StoreDefinition::new("auth")
                    .persisted(PersistOptions::default().storage(StorageScope::Session)),
            )
            .expect("define");
        store.set("token", &"abc").expect("set");

        let session = plugin.backend(StorageScope::Session).expect("session backend");
        let local = plugin.backend(StorageScope::Local).expect("local backend");
        assert!(session.get_item("auth").expect("get").is_some());
        assert!(local.get_item("auth").expect("get").is_none());
    }

    #[test]
    fn test_from_config_uses_store_dir() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let mut config = AppConfig::default();
        config.store.data_dir = Some(tmp.path().join("state"));
        config.store.default_storage = "session".to_string();

        let plugin = StorePlugin::from_config(&config).expect("plugin");
        assert_eq!(plugin.default_scope(), StorageScope::Session);
        assert!(tmp.path().join("state").is_dir());
        assert!(plugin.store("auth").is_none());
    }
}
