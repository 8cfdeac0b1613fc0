//! Session tracking: identity-provider notifications become [`SessionState`] values.

use std::rc::Rc;

use leptos::logging;
use nav_host::{AuthUser, IdentityProvider};

use crate::{engine::Spawner, model::SessionState};

/// Derives the session for one provider notification. Admin is exact equality between the
/// verified account and `privileged_account`.
pub fn derive_session(user: Option<AuthUser>, privileged_account: &str) -> SessionState {
    let Some(user) = user else {
        return SessionState::signed_out();
    };
    let is_admin = !user.is_anonymous && user.email.as_deref() == Some(privileged_account);
    SessionState {
        signed_in: true,
        user_id: Some(user.uid),
        account: user.email,
        anonymous: user.is_anonymous,
        is_admin,
    }
}

/// Subscribes once to `identity`, forwarding every derived session to `on_session`.
///
/// A failed subscription is treated as a single signed-out notification. When the host carries
/// an initial auth token, a token sign-in is requested on `spawn`.
pub fn install_session_tracker(
    identity: Rc<dyn IdentityProvider>,
    privileged_account: String,
    spawn: &Spawner,
    on_session: Rc<dyn Fn(SessionState)>,
) {
    let forward = on_session.clone();
    let subscribed = identity.subscribe(Rc::new(move |user| {
        forward(derive_session(user, &privileged_account));
    }));
    if let Err(err) = subscribed {
        logging::warn!("navbar identity provider unavailable, treating as signed out: {err}");
        on_session(SessionState::signed_out());
        return;
    }

    if let Some(token) = identity.initial_auth_token() {
        spawn(Box::pin(async move {
            if let Err(err) = identity.sign_in_with_token(&token).await {
                logging::warn!("navbar token sign-in failed: {err}");
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, future::Future, pin::Pin};

    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use nav_host::{MemoryIdentityProvider, NoopIdentityProvider};
    use pretty_assertions::assert_eq;

    use super::*;

    const ADMIN: &str = "admin@arcade-hub.example";

    fn user(uid: &str, email: Option<&str>) -> AuthUser {
        AuthUser {
            uid: uid.to_string(),
            email: email.map(str::to_string),
            is_anonymous: false,
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<SessionState>>>, Rc<dyn Fn(SessionState)>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Rc::new(move |session| sink.borrow_mut().push(session)))
    }

    fn pool_spawner(pool: &LocalPool) -> Spawner {
        let spawner = pool.spawner();
        Rc::new(move |future: Pin<Box<dyn Future<Output = ()>>>| {
            spawner.spawn_local(future).expect("spawn");
        })
    }

    #[test]
    fn admin_requires_exact_account_match() {
        assert!(derive_session(Some(user("a", Some(ADMIN))), ADMIN).is_admin);
        assert!(!derive_session(Some(user("a", Some("ADMIN@arcade-hub.example"))), ADMIN).is_admin);
        assert!(!derive_session(Some(user("a", None)), ADMIN).is_admin);
        assert_eq!(derive_session(None, ADMIN), SessionState::signed_out());
    }

    #[test]
    fn anonymous_session_is_signed_in_guest() {
        let session = derive_session(
            Some(AuthUser {
                uid: "g".to_string(),
                email: None,
                is_anonymous: true,
            }),
            ADMIN,
        );
        assert!(session.signed_in);
        assert!(session.anonymous);
        assert!(!session.is_admin);
    }

    #[test]
    fn tracker_forwards_initial_and_later_notifications() {
        let pool = LocalPool::new();
        let identity = MemoryIdentityProvider::default();
        let (seen, sink) = recorder();

        install_session_tracker(
            Rc::new(identity.clone()),
            ADMIN.to_string(),
            &pool_spawner(&pool),
            sink,
        );
        identity.emit(Some(user("u1", Some(ADMIN))));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(!seen[0].signed_in);
        assert!(seen[1].is_admin);
    }

    #[test]
    fn failed_subscription_yields_one_signed_out_session() {
        let pool = LocalPool::new();
        let (seen, sink) = recorder();

        install_session_tracker(
            Rc::new(NoopIdentityProvider),
            ADMIN.to_string(),
            &pool_spawner(&pool),
            sink,
        );

        assert_eq!(*seen.borrow(), vec![SessionState::signed_out()]);
    }

    #[test]
    fn initial_token_requests_token_sign_in() {
        let mut pool = LocalPool::new();
        let identity = MemoryIdentityProvider::default().with_initial_token("abc");
        let (seen, sink) = recorder();

        install_session_tracker(
            Rc::new(identity.clone()),
            ADMIN.to_string(),
            &pool_spawner(&pool),
            sink,
        );
        pool.run_until_stalled();

        assert_eq!(identity.requests(), vec!["token".to_string()]);
        assert_eq!(
            seen.borrow().last().and_then(|s| s.user_id.clone()),
            Some("token:abc".to_string())
        );
    }

    #[test]
    fn token_sign_in_failure_leaves_session_untouched() {
        let mut pool = LocalPool::new();
        let identity = MemoryIdentityProvider::default().with_initial_token("abc");
        identity.fail_requests("expired");
        let (seen, sink) = recorder();

        install_session_tracker(
            Rc::new(identity.clone()),
            ADMIN.to_string(),
            &pool_spawner(&pool),
            sink,
        );
        pool.run_until_stalled();

        assert_eq!(*seen.borrow(), vec![SessionState::signed_out()]);
    }
}
