//! Local persistence for pins, the one-time hint flag, and the tab strip scroll offset.

use leptos::logging;
use nav_host::{load_json_with, save_json_with, KeyValueStore};

use crate::{config::NavConfig, model::PinnedPage};

const HINT_SHOWN_VALUE: &str = "true";

/// Loads the pinned-page list. Missing or malformed data yields an empty list.
pub fn load_pins(store: &dyn KeyValueStore, config: &NavConfig) -> Vec<PinnedPage> {
    match load_json_with::<_, Vec<PinnedPage>>(store, &config.pins_key()) {
        Ok(pins) => pins.unwrap_or_default(),
        Err(err) => {
            logging::warn!("navbar pinned pages unreadable, starting empty: {err}");
            Vec::new()
        }
    }
}

/// Persists the full ordered pin list.
///
/// # Errors
///
/// Returns an error when the store rejects the write.
pub fn save_pins(
    store: &dyn KeyValueStore,
    config: &NavConfig,
    pins: &[PinnedPage],
) -> Result<(), String> {
    save_json_with(store, &config.pins_key(), &pins)
}

/// Whether the one-time pin hint has already been shown.
pub fn load_hint_shown(store: &dyn KeyValueStore, config: &NavConfig) -> bool {
    store.get_item(&config.hint_key()).as_deref() == Some(HINT_SHOWN_VALUE)
}

/// Records that the pin hint was shown.
///
/// # Errors
///
/// Returns an error when the store rejects the write.
pub fn save_hint_shown(store: &dyn KeyValueStore, config: &NavConfig) -> Result<(), String> {
    store.set_item(&config.hint_key(), HINT_SHOWN_VALUE)
}

/// Reads the stored tab strip offset; absent or unparsable values read as `None`.
pub fn load_scroll_offset(store: &dyn KeyValueStore, key: &str) -> Option<i32> {
    store.get_item(key)?.trim().parse().ok()
}

/// Stores the tab strip offset as an integer string.
///
/// # Errors
///
/// Returns an error when the store rejects the write.
pub fn save_scroll_offset(store: &dyn KeyValueStore, key: &str, offset: i32) -> Result<(), String> {
    store.set_item(key, &offset.to_string())
}
