//! `localStorage` and `sessionStorage` backed [`KeyValueStore`] implementations.

use nav_host::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageArea {
    Local,
    Session,
}

impl StorageArea {
    #[cfg(target_arch = "wasm32")]
    fn label(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn storage(self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self {
            Self::Local => window.local_storage(),
            Self::Session => window.session_storage(),
        };
        storage.ok().flatten()
    }

    fn get_item(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = self
                .storage()
                .ok_or_else(|| format!("{} unavailable", self.label()))?;
            storage
                .set_item(key, value)
                .map_err(|e| format!("{} set_item failed: {e:?}", self.label()))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Durable store backed by `window.localStorage`.
pub struct WebLocalStore;

impl KeyValueStore for WebLocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        StorageArea::Local.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        StorageArea::Local.set_item(key, value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Per-tab store backed by `window.sessionStorage`.
pub struct WebSessionStore;

impl KeyValueStore for WebSessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        StorageArea::Session.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        StorageArea::Session.set_item(key, value)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn non_wasm_stores_are_empty_and_accept_writes() {
        let local: &dyn KeyValueStore = &WebLocalStore;
        let session: &dyn KeyValueStore = &WebSessionStore;
        local.set_item("k", "v").expect("local set");
        session.set_item("k", "v").expect("session set");
        assert_eq!(local.get_item("k"), None);
        assert_eq!(session.get_item("k"), None);
    }
}
