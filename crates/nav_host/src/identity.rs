//! Identity provider contracts.
//!
//! The provider owns its own session persistence. The navbar only observes change notifications
//! and issues sign-in/out requests; request results never mutate navbar state directly.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`IdentityProvider`] async methods.
pub type IdentityFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Callback invoked with the provider's current user, or `None` when signed out.
pub type AuthStateCallback = Rc<dyn Fn(Option<AuthUser>)>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Account record delivered by the identity provider.
pub struct AuthUser {
    /// Provider-assigned stable user id.
    pub uid: String,
    /// Verified account identifier, when the provider exposes one.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether this is a guest session.
    #[serde(default)]
    pub is_anonymous: bool,
}

/// Host service for the external identity provider.
pub trait IdentityProvider {
    /// Registers the state-change callback.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider is not initialized on this host.
    fn subscribe(&self, callback: AuthStateCallback) -> Result<(), String>;

    /// Returns a host-supplied token to sign in with at boot, if any.
    fn initial_auth_token(&self) -> Option<String>;

    /// Requests a guest session.
    fn sign_in_anonymous<'a>(&'a self) -> IdentityFuture<'a, Result<(), String>>;

    /// Requests a session from a custom token.
    fn sign_in_with_token<'a>(&'a self, token: &'a str) -> IdentityFuture<'a, Result<(), String>>;

    /// Requests sign-out.
    fn sign_out<'a>(&'a self) -> IdentityFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Provider used when no identity backend is wired. Subscription always fails.
pub struct NoopIdentityProvider;

impl IdentityProvider for NoopIdentityProvider {
    fn subscribe(&self, _callback: AuthStateCallback) -> Result<(), String> {
        Err("identity provider unavailable".to_string())
    }

    fn initial_auth_token(&self) -> Option<String> {
        None
    }

    fn sign_in_anonymous<'a>(&'a self) -> IdentityFuture<'a, Result<(), String>> {
        Box::pin(async { Err("identity provider unavailable".to_string()) })
    }

    fn sign_in_with_token<'a>(
        &'a self,
        _token: &'a str,
    ) -> IdentityFuture<'a, Result<(), String>> {
        Box::pin(async { Err("identity provider unavailable".to_string()) })
    }

    fn sign_out<'a>(&'a self) -> IdentityFuture<'a, Result<(), String>> {
        Box::pin(async { Err("identity provider unavailable".to_string()) })
    }
}

#[derive(Default)]
struct MemoryIdentityInner {
    callbacks: Vec<AuthStateCallback>,
    current: Option<AuthUser>,
    initial_token: Option<String>,
    request_failure: Option<String>,
    requests: Vec<String>,
}

#[derive(Clone, Default)]
/// In-memory identity provider that notifies subscribers synchronously.
pub struct MemoryIdentityProvider {
    inner: Rc<RefCell<MemoryIdentityInner>>,
}

impl MemoryIdentityProvider {
    /// Sets the token returned by [`IdentityProvider::initial_auth_token`].
    pub fn with_initial_token(self, token: impl Into<String>) -> Self {
        self.inner.borrow_mut().initial_token = Some(token.into());
        self
    }

    /// Makes every subsequent sign-in/out request fail with `message`.
    pub fn fail_requests(&self, message: impl Into<String>) {
        self.inner.borrow_mut().request_failure = Some(message.into());
    }

    /// Returns the names of requests issued so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.inner.borrow().requests.clone()
    }

    /// Returns the provider's current user.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.inner.borrow().current.clone()
    }

    /// Replaces the current user and notifies every subscriber.
    pub fn emit(&self, user: Option<AuthUser>) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            inner.current = user.clone();
            inner.callbacks.clone()
        };
        for callback in callbacks {
            callback(user.clone());
        }
    }

    fn request(&self, name: &str, next: Option<AuthUser>) -> Result<(), String> {
        let failure = {
            let mut inner = self.inner.borrow_mut();
            inner.requests.push(name.to_string());
            inner.request_failure.clone()
        };
        if let Some(message) = failure {
            return Err(message);
        }
        self.emit(next);
        Ok(())
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    fn subscribe(&self, callback: AuthStateCallback) -> Result<(), String> {
        let current = {
            let mut inner = self.inner.borrow_mut();
            inner.callbacks.push(callback.clone());
            inner.current.clone()
        };
        callback(current);
        Ok(())
    }

    fn initial_auth_token(&self) -> Option<String> {
        self.inner.borrow().initial_token.clone()
    }

    fn sign_in_anonymous<'a>(&'a self) -> IdentityFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.request(
                "anonymous",
                Some(AuthUser {
                    uid: "guest".to_string(),
                    email: None,
                    is_anonymous: true,
                }),
            )
        })
    }

    fn sign_in_with_token<'a>(&'a self, token: &'a str) -> IdentityFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.request(
                "token",
                Some(AuthUser {
                    uid: format!("token:{token}"),
                    email: None,
                    is_anonymous: false,
                }),
            )
        })
    }

    fn sign_out<'a>(&'a self) -> IdentityFuture<'a, Result<(), String>> {
        Box::pin(async move { self.request("sign_out", None) })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn subscribe_replays_current_user_and_follows_requests() {
        let provider = MemoryIdentityProvider::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        provider
            .subscribe(Rc::new(move |user: Option<AuthUser>| {
                sink.borrow_mut().push(user.map(|u| u.is_anonymous))
            }))
            .expect("subscribe");

        block_on(provider.sign_in_anonymous()).expect("sign in");
        assert_eq!(
            provider.current_user().map(|user| user.uid),
            Some("guest".to_string())
        );
        block_on(provider.sign_out()).expect("sign out");

        assert_eq!(provider.current_user(), None);
        assert_eq!(*seen.borrow(), vec![None, Some(true), None]);
        assert_eq!(provider.requests(), vec!["anonymous", "sign_out"]);
    }

    #[test]
    fn failed_requests_do_not_notify() {
        let provider = MemoryIdentityProvider::default();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        provider
            .subscribe(Rc::new(move |_| counter.set(counter.get() + 1)))
            .expect("subscribe");
        provider.fail_requests("network down");

        assert_eq!(
            block_on(provider.sign_out()),
            Err("network down".to_string())
        );
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn noop_provider_rejects_subscription() {
        assert!(NoopIdentityProvider
            .subscribe(Rc::new(|_| {}))
            .is_err());
    }
}
