//! Browser `window.location` adapters.

use nav_host::{Location, Navigator};

#[derive(Debug, Clone, Copy, Default)]
/// Reads `window.location.pathname`.
pub struct WebLocation;

impl Location for WebLocation {
    fn pathname(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|window| window.location().pathname().ok())
                .unwrap_or_default()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            String::new()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Navigates with `window.location.replace`, leaving no history entry.
pub struct WebNavigator;

impl Navigator for WebNavigator {
    fn replace(&self, url: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            window
                .location()
                .replace(url)
                .map_err(|e| format!("location.replace failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = url;
            Err("navigation is only available when compiled for wasm32".to_string())
        }
    }
}
