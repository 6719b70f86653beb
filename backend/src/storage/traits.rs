//! # Storage Traits
//!
//! Every store persists one JSON document under its own namespaced key. This
//! trait hides where those documents live so the stores work the same against
//! the file system or plain memory.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Key/value persistence for serialized store state
pub trait StateStorage: Send + Sync {
    /// Read the raw document stored under `key`, `None` if nothing was saved yet
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document stored under `key`
    fn save_raw(&self, key: &str, document: &str) -> Result<(), StoreError>;

    /// Forget the document stored under `key`.
    /// Returns true if a document existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

/// Load and deserialize the state stored under `key`
pub fn load_state<T: DeserializeOwned>(
    storage: &dyn StateStorage,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match storage.load_raw(key)? {
        Some(document) => {
            let state = serde_json::from_str(&document)?;
            debug!("Loaded persisted state for '{}'", key);
            Ok(Some(state))
        }
        None => Ok(None),
    }
}

/// Serialize and store `state` under `key`
pub fn save_state<T: Serialize>(
    storage: &dyn StateStorage,
    key: &str,
    state: &T,
) -> Result<(), StoreError> {
    let document = serde_json::to_string(state)?;
    storage.save_raw(key, &document)?;
    debug!("Saved state for '{}' ({} bytes)", key, document.len());
    Ok(())
}
