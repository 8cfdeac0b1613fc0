//! Navbar configuration embedded at build time from `navbar.toml`.

use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::model::Page;

include!(concat!(env!("OUT_DIR"), "/navbar_config_generated.rs"));

#[derive(Debug, Error)]
/// Configuration decoding failures.
pub enum ConfigError {
    /// The embedded JSON did not match [`NavConfig`].
    #[error("navbar config is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The decoded configuration declares no default pages.
    #[error("navbar config declares no default pages")]
    NoDefaultPages,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Page markers and target used by the redirect guard.
pub struct RedirectConfig {
    /// Root landing file, for example `index.html`.
    pub landing_file: String,
    /// Authentication page marker.
    pub authentication_file: String,
    /// Not-found page marker.
    pub not_found_file: String,
    /// Path fragment identifying the games sub-section, for example `/games/`.
    pub games_section: String,
    /// Landing file of the games sub-section.
    pub games_landing_file: String,
    /// Where signed-out visitors are sent.
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Runtime configuration for the navbar engine.
pub struct NavConfig {
    /// Application id; namespaces storage keys.
    pub app_id: String,
    /// The single account identifier granted admin visibility.
    pub privileged_account: String,
    /// Remote collection holding page overrides.
    pub collection_path: String,
    /// Remote page loads slower than this fall back to defaults.
    pub load_timeout_ms: u32,
    /// How long the one-time pin hint stays on screen.
    pub hint_visible_ms: u32,
    /// Animation window of a programmatic smooth scroll.
    pub scroll_settle_ms: u32,
    /// Redirect guard markers.
    pub redirect: RedirectConfig,
    /// Built-in page floor.
    pub default_pages: Vec<Page>,
}

impl NavConfig {
    /// Decodes a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the JSON is malformed or declares no default pages.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        if config.default_pages.is_empty() {
            return Err(ConfigError::NoDefaultPages);
        }
        Ok(config)
    }

    /// Local-storage key for the pinned-page list.
    pub fn pins_key(&self) -> String {
        format!("{}.navbar.pinned.v1", self.app_id)
    }

    /// Local-storage key for the one-time hint flag.
    pub fn hint_key(&self) -> String {
        format!("{}.navbar.pin_hint_shown", self.app_id)
    }

    /// Session-storage key for the tab strip scroll offset.
    pub fn scroll_key(&self) -> String {
        format!("{}.navbar.scroll", self.app_id)
    }
}

/// Returns the process-wide configuration decoded from the embedded `navbar.toml`.
pub fn nav_config() -> &'static NavConfig {
    static CONFIG: OnceLock<NavConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        NavConfig::from_json(NAVBAR_CONFIG_JSON)
            .expect("build.rs validates the embedded navbar config")
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_config_parses_with_unique_defaults() {
        let config = nav_config();
        assert!(!config.default_pages.is_empty());
        let mut titles: Vec<_> = config.default_pages.iter().map(|p| &p.title).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), config.default_pages.len());
        assert!(config
            .default_pages
            .iter()
            .any(|page| page.url == config.redirect.landing_file));
    }

    #[test]
    fn storage_keys_are_namespaced_by_app_id() {
        let config = nav_config();
        assert!(config.pins_key().starts_with(&config.app_id));
        assert!(config.hint_key().starts_with(&config.app_id));
        assert!(config.scroll_key().starts_with(&config.app_id));
        assert_ne!(config.pins_key(), config.hint_key());
    }

    #[test]
    fn config_without_default_pages_is_rejected() {
        let mut value: serde_json::Value =
            serde_json::from_str(NAVBAR_CONFIG_JSON).expect("embedded json");
        value["default_pages"] = serde_json::json!([]);
        let err = NavConfig::from_json(&value.to_string()).expect_err("empty defaults");
        assert!(matches!(err, ConfigError::NoDefaultPages));
    }
}
