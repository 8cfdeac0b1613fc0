//! JS bridge to the host page's identity provider and document collection.
//!
//! The host page installs `globalThis.navbarHost` with `subscribe`, `signInAnonymous`,
//! `signInWithToken`, `signOut`, `listPages`, and an optional `initialAuthToken`. A missing
//! object surfaces as an error from every call. Non-wasm builds get a shim that reports the
//! bridge as unavailable.

use nav_host::{
    AuthStateCallback, DocumentCollection, DocumentFuture, IdentityFuture, IdentityProvider,
};
use serde_json::Value;

#[cfg(target_arch = "wasm32")]
mod imp {
    use js_sys::Promise;
    use nav_host::{AuthStateCallback, AuthUser};
    use serde_json::Value;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    #[wasm_bindgen(inline_js = r#"
function host() {
  const h = globalThis.navbarHost;
  if (!h) {
    throw new Error('navbarHost is not installed on this page');
  }
  return h;
}

function toUser(user) {
  if (!user) {
    return null;
  }
  return {
    uid: String(user.uid),
    email: typeof user.email === 'string' ? user.email : null,
    isAnonymous: !!user.isAnonymous,
  };
}

export function jsNavbarSubscribe(callback) {
  host().subscribe((user) => callback(toUser(user)));
}

export function jsNavbarInitialToken() {
  const h = globalThis.navbarHost;
  return h && typeof h.initialAuthToken === 'string' ? h.initialAuthToken : null;
}

export async function jsNavbarSignInAnonymous() { await host().signInAnonymous(); }
export async function jsNavbarSignInWithToken(token) { await host().signInWithToken(token); }
export async function jsNavbarSignOut() { await host().signOut(); }

export async function jsNavbarListPages(path) {
  const docs = await host().listPages(path);
  return Array.isArray(docs) ? docs : [];
}
"#)]
    extern "C" {
        #[wasm_bindgen(catch, js_name = jsNavbarSubscribe)]
        fn js_subscribe(callback: &Closure<dyn Fn(JsValue)>) -> Result<(), JsValue>;
        #[wasm_bindgen(js_name = jsNavbarInitialToken)]
        fn js_initial_token() -> Option<String>;
        #[wasm_bindgen(js_name = jsNavbarSignInAnonymous)]
        fn js_sign_in_anonymous() -> Promise;
        #[wasm_bindgen(js_name = jsNavbarSignInWithToken)]
        fn js_sign_in_with_token(token: &str) -> Promise;
        #[wasm_bindgen(js_name = jsNavbarSignOut)]
        fn js_sign_out() -> Promise;
        #[wasm_bindgen(js_name = jsNavbarListPages)]
        fn js_list_pages(path: &str) -> Promise;
    }

    fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    async fn await_promise(promise: Promise) -> Result<JsValue, String> {
        JsFuture::from(promise).await.map_err(js_error_to_string)
    }

    pub fn subscribe(callback: AuthStateCallback) -> Result<(), String> {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |raw: JsValue| {
            let user = if raw.is_null() || raw.is_undefined() {
                None
            } else {
                match from_value::<AuthUser>(raw) {
                    Ok(user) => Some(user),
                    Err(err) => {
                        web_sys::console::warn_1(&JsValue::from_str(&format!(
                            "identity callback payload rejected: {err}"
                        )));
                        None
                    }
                }
            };
            callback(user);
        });
        js_subscribe(&closure).map_err(js_error_to_string)?;
        // The subscription lives as long as the page.
        closure.forget();
        Ok(())
    }

    pub fn initial_auth_token() -> Option<String> {
        js_initial_token()
    }

    pub async fn sign_in_anonymous() -> Result<(), String> {
        await_promise(js_sign_in_anonymous()).await.map(|_| ())
    }

    pub async fn sign_in_with_token(token: &str) -> Result<(), String> {
        await_promise(js_sign_in_with_token(token)).await.map(|_| ())
    }

    pub async fn sign_out() -> Result<(), String> {
        await_promise(js_sign_out()).await.map(|_| ())
    }

    pub async fn list_documents(path: &str) -> Result<Vec<Value>, String> {
        let value = await_promise(js_list_pages(path)).await?;
        from_value(value).map_err(|e| e.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use nav_host::AuthStateCallback;
    use serde_json::Value;

    fn unsupported() -> String {
        "navbar host bridge is only available when compiled for wasm32".to_string()
    }

    pub fn subscribe(_callback: AuthStateCallback) -> Result<(), String> {
        Err(unsupported())
    }

    pub fn initial_auth_token() -> Option<String> {
        None
    }

    pub async fn sign_in_anonymous() -> Result<(), String> {
        Err(unsupported())
    }

    pub async fn sign_in_with_token(_token: &str) -> Result<(), String> {
        Err(unsupported())
    }

    pub async fn sign_out() -> Result<(), String> {
        Err(unsupported())
    }

    pub async fn list_documents(_path: &str) -> Result<Vec<Value>, String> {
        Err(unsupported())
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Identity provider reached through `globalThis.navbarHost`.
pub struct WebIdentityProvider;

impl IdentityProvider for WebIdentityProvider {
    fn subscribe(&self, callback: AuthStateCallback) -> Result<(), String> {
        imp::subscribe(callback)
    }

    fn initial_auth_token(&self) -> Option<String> {
        imp::initial_auth_token()
    }

    fn sign_in_anonymous<'a>(&'a self) -> IdentityFuture<'a, Result<(), String>> {
        Box::pin(imp::sign_in_anonymous())
    }

    fn sign_in_with_token<'a>(&'a self, token: &'a str) -> IdentityFuture<'a, Result<(), String>> {
        Box::pin(imp::sign_in_with_token(token))
    }

    fn sign_out<'a>(&'a self) -> IdentityFuture<'a, Result<(), String>> {
        Box::pin(imp::sign_out())
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Document collection reached through `globalThis.navbarHost.listPages`.
pub struct WebDocumentCollection;

impl DocumentCollection for WebDocumentCollection {
    fn list_documents<'a>(
        &'a self,
        path: &'a str,
    ) -> DocumentFuture<'a, Result<Vec<Value>, String>> {
        Box::pin(imp::list_documents(path))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::*;

    #[test]
    fn non_wasm_bridge_reports_unavailable() {
        assert!(WebIdentityProvider.subscribe(Rc::new(|_| {})).is_err());
        assert_eq!(WebIdentityProvider.initial_auth_token(), None);
        assert!(block_on(WebIdentityProvider.sign_out()).is_err());
        assert!(block_on(WebDocumentCollection.list_documents("pages")).is_err());
    }
}
