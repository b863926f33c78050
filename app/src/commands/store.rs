//! Store commands.

use crate::error::CommandError;
use crate::state::AppState;
use bookchat_store::{PersistOptions, StateStore, StoreDefinition};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Store declaration sent by a view.
#[derive(Debug, Clone, Deserialize)]
pub struct DefineStoreRequest {
    /// Store ID
    pub id: String,
    /// Initial state (an object)
    #[serde(default)]
    pub initial: Option<Value>,
    /// Persistence options, `None` for an in-memory store
    #[serde(default)]
    pub persist: Option<PersistOptions>,
}

fn lookup(state: &AppState, id: &str) -> Result<Arc<StateStore>, CommandError> {
    state.store(id)?.ok_or_else(|| {
        CommandError::with_details(
            "STORE_NOT_FOUND",
            format!("Store '{id}' is not defined"),
            serde_json::json!({ "store": id }),
        )
    })
}

/// Define a store (or fetch the existing one) and return its state.
pub fn define_store(
    state: &AppState,
    request: DefineStoreRequest,
) -> Result<Map<String, Value>, CommandError> {
    let plugin = state.store_plugin()?;

    let mut definition = StoreDefinition::new(request.id.clone());
    if let Some(initial) = &request.initial {
        definition = definition.with_initial(initial)?;
    }
    if let Some(persist) = request.persist {
        definition = definition.persisted(persist);
    }

    let store = plugin.define(definition)?;
    info!(store = %request.id, "store defined by command");
    Ok(store.snapshot())
}

/// Read one field of a store.
pub fn store_get(
    state: &AppState,
    id: String,
    field: String,
) -> Result<Option<Value>, CommandError> {
    Ok(lookup(state, &id)?.get(&field))
}

/// Whole state of a store.
pub fn store_snapshot(state: &AppState, id: String) -> Result<Map<String, Value>, CommandError> {
    Ok(lookup(state, &id)?.snapshot())
}

/// Set one field of a store.
pub fn store_set(
    state: &AppState,
    id: String,
    field: String,
    value: Value,
) -> Result<(), CommandError> {
    lookup(state, &id)?.set(&field, &value)?;
    Ok(())
}

/// Deep-merge an object into a store.
pub fn store_patch(state: &AppState, id: String, patch: Value) -> Result<(), CommandError> {
    lookup(state, &id)?.patch(patch)?;
    Ok(())
}

/// Restore a store's initial state.
pub fn store_reset(state: &AppState, id: String) -> Result<(), CommandError> {
    lookup(state, &id)?.reset()?;
    Ok(())
}

/// IDs of all defined stores.
pub fn list_stores(state: &AppState) -> Result<Vec<String>, CommandError> {
    Ok(state.store_plugin()?.ids())
}
