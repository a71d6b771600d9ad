//! # Key/value persistence
//!
//! The token manager and the dashboard preferences persist small strings through
//! the [`KeyValueStore`] trait, so the same logic runs against an in-memory map
//! ([`crate::MemoryStore`], native builds and tests) or the browser's
//! `localStorage` ([`crate::LocalStore`], web builds).
//!
//! Browser storage is synchronous, so the trait is too. Implementations never fail
//! loudly: an unavailable backend reads as empty and ignores writes.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Synchronous string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Load a JSON document stored under `key`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable stored value");
            None
        }
    }
}

/// Store `value` as JSON under `key`.
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => tracing::warn!(key, error = %e, "Failed to serialize value for storage"),
    }
}
