//! Named state stores with optional persistence.

use crate::error::{Result, StoreError};
use crate::storage::{StorageBackend, StorageScope};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, warn};

/// How a store is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistOptions {
    /// Storage key (defaults to the store ID)
    pub key: Option<String>,
    /// Storage medium (defaults to the plugin's default scope)
    pub storage: Option<StorageScope>,
    /// Dot-separated paths to persist (`user.name`); everything when `None`
    pub paths: Option<Vec<String>>,
}

impl PersistOptions {
    /// Persist under a custom key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Persist in the given medium.
    #[must_use]
    pub fn storage(mut self, scope: StorageScope) -> Self {
        self.storage = Some(scope);
        self
    }

    /// Persist only the given paths.
    #[must_use]
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }
}

/// Declaration of a store: its ID, initial state and persistence.
#[derive(Debug, Clone)]
pub struct StoreDefinition {
    /// Unique store ID (`auth`, `books`)
    pub id: String,
    /// State the store starts from before hydration
    pub initial: Map<String, Value>,
    /// Persistence, `None` for an in-memory store
    pub persist: Option<PersistOptions>,
}

impl StoreDefinition {
    /// Declare a non-persisted store with an empty initial state.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            initial: Map::new(),
            persist: None,
        }
    }

    /// Set the initial state.
    ///
    /// # Errors
    /// Returns `NotAnObject` if `initial` doesn't serialize to a JSON object.
    pub fn with_initial<T: Serialize>(mut self, initial: &T) -> Result<Self> {
        match serde_json::to_value(initial)? {
            Value::Object(map) => {
                self.initial = map;
                Ok(self)
            }
            _ => Err(StoreError::NotAnObject { store: self.id }),
        }
    }

    /// Enable persistence.
    #[must_use]
    pub fn persisted(mut self, options: PersistOptions) -> Self {
        self.persist = Some(options);
        self
    }
}

struct Persistence {
    /// Held from snapshot to write so the newest state is written last
    write_lock: Mutex<()>,
    key: String,
    scope: StorageScope,
    paths: Option<Vec<String>>,
    backend: Arc<dyn StorageBackend>,
}

/// A named JSON-object state shared by the views that use it.
///
/// Every mutation writes the persisted part of the state through to
/// storage.
pub struct StateStore {
    id: String,
    initial: Map<String, Value>,
    state: RwLock<Map<String, Value>>,
    persistence: Option<Persistence>,
}

impl StateStore {
    pub(crate) fn new(
        definition: StoreDefinition,
        backend: Option<(StorageScope, Arc<dyn StorageBackend>)>,
    ) -> Self {
        let persistence = match (definition.persist, backend) {
            (Some(options), Some((scope, backend))) => Some(Persistence {
                write_lock: Mutex::new(()),
                key: options.key.unwrap_or_else(|| definition.id.clone()),
                scope,
                paths: options.paths,
                backend,
            }),
            _ => None,
        };

        Self {
            id: definition.id,
            state: RwLock::new(definition.initial.clone()),
            initial: definition.initial,
            persistence,
        }
    }

    /// Store ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Storage key, if persisted.
    #[must_use]
    pub fn storage_key(&self) -> Option<&str> {
        self.persistence.as_ref().map(|p| p.key.as_str())
    }

    /// Storage medium, if persisted.
    #[must_use]
    pub fn scope(&self) -> Option<StorageScope> {
        self.persistence.as_ref().map(|p| p.scope)
    }

    /// Copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> Map<String, Value> {
        self.state.read().expect("store lock poisoned").clone()
    }

    /// Raw value of a top-level field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<Value> {
        self.state
            .read()
            .expect("store lock poisoned")
            .get(field)
            .cloned()
    }

    /// Typed value of a top-level field.
    ///
    /// # Errors
    /// Returns `Serialization` if the value doesn't deserialize as `T`.
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>> {
        self.get(field)
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    /// Set a top-level field and persist.
    ///
    /// # Errors
    /// Returns error if the value doesn't serialize or storage fails.
    pub fn set<T: Serialize>(&self, field: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.state
            .write()
            .expect("store lock poisoned")
            .insert(field.to_string(), value);
        self.persist()
    }

    /// Remove a top-level field and persist. Returns the removed value.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn remove(&self, field: &str) -> Result<Option<Value>> {
        let removed = self
            .state
            .write()
            .expect("store lock poisoned")
            .remove(field);
        self.persist()?;
        Ok(removed)
    }

    /// Deep-merge an object into the state and persist.
    ///
    /// # Errors
    /// Returns `NotAnObject` if `patch` isn't an object, or a storage error.
    pub fn patch(&self, patch: Value) -> Result<()> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::NotAnObject {
                store: self.id.clone(),
            });
        };

        {
            let mut state = self.state.write().expect("store lock poisoned");
            merge(&mut state, patch);
        }
        self.persist()
    }

    /// Restore the initial state and persist.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn reset(&self) -> Result<()> {
        *self.state.write().expect("store lock poisoned") = self.initial.clone();
        self.persist()
    }

    /// Write the persisted part of the state to storage.
    ///
    /// No-op for stores without persistence.
    ///
    /// # Errors
    /// Returns error if serialization or storage fails.
    pub fn persist(&self) -> Result<()> {
        let Some(persistence) = &self.persistence else {
            return Ok(());
        };

        let _writing = persistence
            .write_lock
            .lock()
            .expect("store write lock poisoned");
        let selected = {
            let state = self.state.read().expect("store lock poisoned");
            select_paths(&state, persistence.paths.as_deref())
        };
        let contents = serde_json::to_string(&Value::Object(selected))?;
        persistence.backend.set_item(&persistence.key, &contents)?;

        debug!(
            store = %self.id,
            key = %persistence.key,
            scope = %persistence.scope,
            "persisted store"
        );
        Ok(())
    }

    /// Merge previously persisted state into the current state.
    ///
    /// Unreadable or malformed documents are discarded with a warning and
    /// the store keeps its current state.
    ///
    /// # Errors
    /// Returns error only if the storage backend fails.
    pub fn hydrate(&self) -> Result<bool> {
        let Some(persistence) = &self.persistence else {
            return Ok(false);
        };

        let Some(contents) = persistence.backend.get_item(&persistence.key)? else {
            return Ok(false);
        };

        let restored = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => select_paths(&map, persistence.paths.as_deref()),
            Ok(_) => {
                warn!(
                    store = %self.id,
                    key = %persistence.key,
                    "persisted state is not an object, ignoring"
                );
                return Ok(false);
            }
            Err(e) => {
                warn!(
                    store = %self.id,
                    key = %persistence.key,
                    error = %e,
                    "persisted state is not valid JSON, ignoring"
                );
                return Ok(false);
            }
        };

        let mut state = self.state.write().expect("store lock poisoned");
        merge(&mut state, restored);
        debug!(store = %self.id, key = %persistence.key, "hydrated store");
        Ok(true)
    }

    /// Remove the persisted document.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn clear_persisted(&self) -> Result<()> {
        match &self.persistence {
            Some(persistence) => persistence.backend.remove_item(&persistence.key),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("id", &self.id)
            .field("storage_key", &self.storage_key())
            .field("scope", &self.scope())
            .finish_non_exhaustive()
    }
}

/// Copy the values at `paths` (dot-separated) out of `state`.
fn select_paths(state: &Map<String, Value>, paths: Option<&[String]>) -> Map<String, Value> {
    let Some(paths) = paths else {
        return state.clone();
    };

    let mut selected = Map::new();
    for path in paths {
        let mut parts = path.split('.');
        let Some(first) = parts.next() else {
            continue;
        };
        let Some(mut value) = state.get(first) else {
            continue;
        };

        let rest: Vec<&str> = parts.collect();
        let mut found = true;
        for part in &rest {
            match value.get(part) {
                Some(next) => value = next,
                None => {
                    found = false;
                    break;
                }
            }
        }

        if found {
            let mut keys = vec![first];
            keys.extend(rest);
            insert_path(&mut selected, &keys, value.clone());
        }
    }
    selected
}

fn insert_path(target: &mut Map<String, Value>, keys: &[&str], value: Value) {
    match keys {
        [] => {}
        [last] => {
            target.insert((*last).to_string(), value);
        }
        [head, tail @ ..] => {
            let child = target
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(map) = child {
                insert_path(map, tail, value);
            }
        }
    }
}

/// Deep merge: objects merge key by key, anything else replaces.
fn merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) =
            (target.get_mut(&key), &value)
        {
            merge(existing, incoming.clone());
            continue;
        }
        target.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn persisted_store(
        backend: &Arc<MemoryStorage>,
        options: PersistOptions,
    ) -> StateStore {
        let definition = StoreDefinition::new("auth")
            .with_initial(&json!({"token": null, "user": {"name": "", "email": ""}}))
            .expect("object initial")
            .persisted(options);
        let backend: Arc<dyn StorageBackend> = backend.clone();
        StateStore::new(definition, Some((StorageScope::Session, backend)))
    }

    #[test]
    fn test_select_paths() {
        let state = object(json!({"token": "t", "user": {"name": "ann", "email": "a@x"}}));
        let paths = vec!["token".to_string(), "user.name".to_string(), "missing.x".to_string()];
        let selected = select_paths(&state, Some(&paths));
        assert_eq!(
            Value::Object(selected),
            json!({"token": "t", "user": {"name": "ann"}})
        );
        assert_eq!(select_paths(&state, None), state);
    }

    #[test]
    fn test_merge_is_deep() {
        let mut target = object(json!({"user": {"name": "ann", "email": "a@x"}, "n": 1}));
        merge(&mut target, object(json!({"user": {"name": "bo"}, "n": 2})));
        assert_eq!(
            Value::Object(target),
            json!({"user": {"name": "bo", "email": "a@x"}, "n": 2})
        );
    }

    #[test]
    fn test_set_writes_through() {
        let backend = Arc::new(MemoryStorage::new());
        let store = persisted_store(&backend, PersistOptions::default());

        store.set("token", &"abc").expect("set token");
        let raw = backend.get_item("auth").expect("get").expect("persisted");
        let doc: Value = serde_json::from_str(&raw).expect("valid JSON");
        assert_eq!(doc["token"], json!("abc"));
        assert_eq!(store.get_as::<String>("token").expect("typed"), Some("abc".to_string()));
    }

    #[test]
    fn test_paths_limit_persisted_fields() {
        let backend = Arc::new(MemoryStorage::new());
        let store = persisted_store(
            &backend,
            PersistOptions::default().key("session-auth").paths(["token"]),
        );

        store
            .patch(json!({"token": "abc", "user": {"name": "ann"}}))
            .expect("patch");
        let raw = backend.get_item("session-auth").expect("get").expect("persisted");
        assert_eq!(serde_json::from_str::<Value>(&raw).expect("json"), json!({"token": "abc"}));

        // State itself still holds everything
        assert_eq!(store.get("user"), Some(json!({"name": "ann", "email": ""})));
    }

    #[test]
    fn test_hydrate_restores_state() {
        let backend = Arc::new(MemoryStorage::new());
        backend
            .set_item("auth", r#"{"token":"saved","user":{"name":"ann"}}"#)
            .expect("seed storage");

        let store = persisted_store(&backend, PersistOptions::default());
        assert!(store.hydrate().expect("hydrate"));
        assert_eq!(store.get("token"), Some(json!("saved")));
        assert_eq!(store.get("user"), Some(json!({"name": "ann", "email": ""})));
    }

    #[test]
    fn test_hydrate_ignores_corrupt_data() {
        let backend = Arc::new(MemoryStorage::new());
        backend.set_item("auth", "{not json").expect("seed storage");

        let store = persisted_store(&backend, PersistOptions::default());
        assert!(!store.hydrate().expect("hydrate"));
        assert_eq!(store.get("token"), Some(Value::Null));

        backend.set_item("auth", "[1, 2]").expect("seed storage");
        assert!(!store.hydrate().expect("hydrate"));
    }

    #[test]
    fn test_reset_and_remove() {
        let backend = Arc::new(MemoryStorage::new());
        let store = persisted_store(&backend, PersistOptions::default());

        store.set("token", &"abc").expect("set");
        assert_eq!(store.remove("token").expect("remove"), Some(json!("abc")));
        assert_eq!(store.get("token"), None);

        store.reset().expect("reset");
        assert_eq!(store.get("token"), Some(Value::Null));
    }

    #[test]
    fn test_non_persisted_store() {
        let store = StateStore::new(StoreDefinition::new("ui"), None);
        store.set("sidebar", &true).expect("set");
        assert!(store.storage_key().is_none());
        assert!(!store.hydrate().expect("hydrate"));
        assert_eq!(store.get_as::<bool>("sidebar").expect("typed"), Some(true));
    }

    #[test]
    fn test_patch_rejects_non_object() {
        let store = StateStore::new(StoreDefinition::new("ui"), None);
        assert!(matches!(
            store.patch(json!([1])),
            Err(StoreError::NotAnObject { .. })
        ));
        assert!(StoreDefinition::new("ui").with_initial(&42).is_err());
    }
}
