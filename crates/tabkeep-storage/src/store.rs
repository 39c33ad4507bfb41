//! Persistent key/value store abstraction
//!
//! Reads never fail outward: a missing key, a broken connection or a value
//! that no longer deserializes all fall back to the caller's default. Writes
//! report their error so the caller can surface it, but callers keep their
//! in-memory state either way.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::database::Database;
use crate::Result;

pub trait PersistentStore: Send + Sync {
    /// Raw JSON text stored under `key`, if any.
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;
}

/// Store handle shared by the history, notes, session and timer stores.
pub type SharedStore = Arc<dyn PersistentStore>;

impl PersistentStore for Database {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.get_setting(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.set_setting(key, value)
    }
}

/// Typed JSON access on top of any [`PersistentStore`].
pub trait StoreExt {
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T;
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()>;
}

impl<S: PersistentStore + ?Sized> StoreExt for S {
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read setting, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Malformed stored value, using default");
                default
            }
        }
    }

    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json)
    }
}

/// In-process store used for tests and for running without a profile on disk.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl PersistentStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn test_missing_key_returns_default() {
        let store = MemoryStore::new();
        let history: Vec<String> = store.get(keys::HISTORY, Vec::new());
        assert!(history.is_empty());
        assert_eq!(store.get(keys::SESSION_INDEX, 3usize), 3);
    }

    #[test]
    fn test_typed_roundtrip() {
        let store = MemoryStore::new();
        store
            .set(keys::HOME_URL, "https://example.com")
            .unwrap();
        let home: String = store.get(keys::HOME_URL, String::new());
        assert_eq!(home, "https://example.com");
    }

    #[test]
    fn test_malformed_value_returns_default() {
        let store = MemoryStore::new();
        store.set_raw(keys::NOTES, "{ not json").unwrap();

        let notes: HashMap<String, String> = store.get(keys::NOTES, HashMap::new());
        assert!(notes.is_empty());

        // Valid JSON of the wrong shape is treated the same way
        store.set_raw(keys::SESSION_INDEX, "\"two\"").unwrap();
        assert_eq!(store.get(keys::SESSION_INDEX, 0usize), 0);
    }

    #[test]
    fn test_database_through_trait_object() {
        let store: SharedStore = Arc::new(Database::open_in_memory().unwrap());
        store.set(keys::DARK_MODE, &true).unwrap();
        assert!(store.get(keys::DARK_MODE, false));
    }
}
