//! Synchronous key/value storage contracts and adapters.
//!
//! Browser `localStorage` and `sessionStorage` are synchronous, so unlike the async app-state
//! contracts this trait returns values directly. Values are stored as text per key.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for string values keyed by string.
pub trait KeyValueStore {
    /// Reads the raw string stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Writes a raw string under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable or rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op store for unsupported targets and baseline tests.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by string. Clones share the same backing map.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and deserializes a JSON value through a [`KeyValueStore`].
///
/// Returns `Ok(None)` when the key is absent.
///
/// # Errors
///
/// Returns an error when the stored text is not valid JSON for `T`.
pub fn load_json_with<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.get_item(key) else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a JSON value through a [`KeyValueStore`].
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_json_with<S: KeyValueStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.set_item(key, &raw)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        title: String,
    }

    #[test]
    fn memory_store_keeps_the_last_write() {
        let store = MemoryKeyValueStore::default();
        let store_obj: &dyn KeyValueStore = &store;
        assert!(store.is_empty());

        store_obj.set_item("nav.key", "41").expect("set");
        store_obj.set_item("nav.key", "42").expect("overwrite");
        assert_eq!(store_obj.get_item("nav.key"), Some("42".to_string()));
        assert_eq!(store_obj.get_item("nav.other"), None);
        assert!(!store.is_empty());
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryKeyValueStore::default();
        let other = store.clone();
        store.set_item("shared", "yes").expect("set");
        assert_eq!(other.get_item("shared"), Some("yes".to_string()));
    }

    #[test]
    fn typed_json_helpers_round_trip() {
        let store = MemoryKeyValueStore::default();
        save_json_with(
            &store,
            "entries",
            &vec![Entry {
                title: "Home".to_string(),
            }],
        )
        .expect("save");

        let loaded: Option<Vec<Entry>> = load_json_with(&store, "entries").expect("load");
        assert_eq!(
            loaded,
            Some(vec![Entry {
                title: "Home".to_string()
            }])
        );
    }

    #[test]
    fn typed_json_load_reports_malformed_payload() {
        let store = MemoryKeyValueStore::default();
        store.set_item("entries", "{not json").expect("set");
        assert!(load_json_with::<_, Vec<Entry>>(&store, "entries").is_err());
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopKeyValueStore;
        assert_eq!(store.get_item("k"), None);
        store.set_item("k", "v").expect("set");
        assert_eq!(store.get_item("k"), None);
    }
}
