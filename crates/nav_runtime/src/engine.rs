//! Reducer container and effect executor shared by the Leptos layer and headless tests.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    pin::Pin,
    rc::{Rc, Weak},
};

use leptos::logging;
use nav_host::{NavHostServices, TaskId};

use crate::{
    config::NavConfig,
    model::NavState,
    persistence::{load_hint_shown, load_pins, save_hint_shown, save_pins},
    redirect::enforce_redirect,
    reducer::{reduce_nav, NavAction, NavEffect, ReducerError},
    registry::load_pages,
    render::{build_snapshot, NavbarRenderer, RenderTarget},
    scroll::ScrollFadeController,
    session::install_session_tracker,
};

/// Runs a detached local future (`spawn_local` in the browser, a local pool in tests).
pub type Spawner = Rc<dyn Fn(Pin<Box<dyn Future<Output = ()>>>)>;

struct EngineInner {
    state: RefCell<NavState>,
    host: NavHostServices,
    config: &'static NavConfig,
    renderer: NavbarRenderer,
    spawn: Spawner,
    hint_timer: Cell<Option<TaskId>>,
}

#[derive(Clone)]
/// Owns [`NavState`], dispatches [`NavAction`] values, and executes the resulting effects.
pub struct NavEngine {
    inner: Rc<EngineInner>,
}

impl NavEngine {
    /// Creates an engine rendering into `target`.
    pub fn new(
        host: NavHostServices,
        config: &'static NavConfig,
        target: Rc<dyn RenderTarget>,
        spawn: Spawner,
    ) -> Self {
        let renderer = NavbarRenderer::new(
            target,
            host.session.clone(),
            config.scroll_key(),
            host.scheduler.clone(),
            config.scroll_settle_ms,
        );
        Self {
            inner: Rc::new(EngineInner {
                state: RefCell::new(NavState::default()),
                host,
                config,
                renderer,
                spawn,
                hint_timer: Cell::new(None),
            }),
        }
    }

    fn downgrade(&self) -> Weak<EngineInner> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(inner: &Weak<EngineInner>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }

    /// Restores persisted pins and subscribes to the identity provider.
    pub fn start(&self) {
        let local = self.inner.host.local.as_ref();
        self.dispatch(NavAction::HydratePersisted {
            pinned: load_pins(local, self.inner.config),
            hint_shown: load_hint_shown(local, self.inner.config),
        });

        let engine = self.downgrade();
        install_session_tracker(
            self.inner.host.identity.clone(),
            self.inner.config.privileged_account.clone(),
            &self.inner.spawn,
            Rc::new(move |session| {
                if let Some(engine) = Self::upgrade(&engine) {
                    engine.dispatch(NavAction::SessionChanged { session });
                }
            }),
        );
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> NavState {
        self.inner.state.borrow().clone()
    }

    /// Fade controller for the tab strip's scroll events.
    pub fn fades(&self) -> ScrollFadeController {
        self.inner.renderer.fades().clone()
    }

    /// Reduces `action` and runs its effects. Reducer errors are logged and leave state as is.
    pub fn dispatch(&self, action: NavAction) {
        let result = {
            let mut state = self.inner.state.borrow_mut();
            reduce_nav(&mut state, action)
        };
        match result {
            Ok(effects) => self.run_effects(effects),
            Err(err @ ReducerError::StaleLoad { .. }) => {
                logging::debug_warn!("navbar dropped page load: {err}")
            }
            Err(err) => logging::warn!("navbar reducer error: {err}"),
        }
    }

    fn run_effects(&self, effects: Vec<NavEffect>) {
        let mut render = false;
        for effect in effects {
            match effect {
                NavEffect::Render => render = true,
                other => self.run_effect(other),
            }
        }
        if render {
            self.render();
        }
    }

    fn render(&self) {
        let snapshot = {
            let state = self.inner.state.borrow();
            build_snapshot(
                &state,
                &self.inner.host.location.pathname(),
                &self.inner.config.redirect.landing_file,
            )
        };
        if let Some(snapshot) = snapshot {
            self.inner.renderer.render(&snapshot);
        }
    }

    fn spawn(&self, future: impl Future<Output = ()> + 'static) {
        (self.inner.spawn)(Box::pin(future));
    }

    fn run_effect(&self, effect: NavEffect) {
        let host = &self.inner.host;
        let config = self.inner.config;
        match effect {
            NavEffect::Render => self.render(),
            NavEffect::LoadPages { generation } => {
                let engine = self.clone();
                self.spawn(async move {
                    let host = &engine.inner.host;
                    let pages =
                        load_pages(host.documents.as_ref(), host.scheduler.as_ref(), config).await;
                    engine.dispatch(NavAction::PagesLoaded { generation, pages });
                });
            }
            NavEffect::PersistPins => {
                let pinned = self.inner.state.borrow().pinned.clone();
                if let Err(err) = save_pins(host.local.as_ref(), config, &pinned) {
                    logging::warn!("navbar pinned pages save failed: {err}");
                }
            }
            NavEffect::PersistHintShown => {
                if let Err(err) = save_hint_shown(host.local.as_ref(), config) {
                    logging::warn!("navbar hint flag save failed: {err}");
                }
            }
            NavEffect::ScheduleHintHide => {
                if let Some(previous) = self.inner.hint_timer.take() {
                    host.scheduler.cancel(previous);
                }
                let engine = self.downgrade();
                let timer = host.scheduler.schedule(
                    config.hint_visible_ms,
                    Box::new(move || {
                        if let Some(engine) = Self::upgrade(&engine) {
                            engine.inner.hint_timer.set(None);
                            engine.dispatch(NavAction::HideHint);
                        }
                    }),
                );
                self.inner.hint_timer.set(Some(timer));
            }
            NavEffect::EnforceRedirect => {
                enforce_redirect(
                    host.location.as_ref(),
                    host.navigator.as_ref(),
                    &config.redirect,
                );
            }
            NavEffect::SignInAnonymous => {
                let identity = host.identity.clone();
                self.spawn(async move {
                    if let Err(err) = identity.sign_in_anonymous().await {
                        logging::warn!("navbar guest sign-in failed: {err}");
                    }
                });
            }
            NavEffect::SignOut => {
                let identity = host.identity.clone();
                self.spawn(async move {
                    if let Err(err) = identity.sign_out().await {
                        logging::warn!("navbar sign-out failed: {err}");
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::{executor::LocalPool, task::LocalSpawnExt};
    use nav_host::{AuthUser, KeyValueStore, MemoryHost};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::nav_config,
        model::NavMenu,
        render::{HeadlessRenderTarget, NavbarView},
    };

    struct Harness {
        host: MemoryHost,
        target: HeadlessRenderTarget,
        pool: LocalPool,
        engine: NavEngine,
    }

    impl Harness {
        fn at(path: &str) -> Self {
            Self::with_host(MemoryHost::at(path))
        }

        fn with_host(host: MemoryHost) -> Self {
            let target = HeadlessRenderTarget::default();
            let pool = LocalPool::new();
            let spawner = pool.spawner();
            let engine = NavEngine::new(
                host.services(),
                nav_config(),
                Rc::new(target.clone()),
                Rc::new(move |future: Pin<Box<dyn Future<Output = ()>>>| {
                    spawner.spawn_local(future).expect("spawn");
                }),
            );
            Self {
                host,
                target,
                pool,
                engine,
            }
        }

        fn settle(&mut self) {
            self.pool.run_until_stalled();
            self.host.scheduler.run_frame();
        }

        fn view(&self) -> NavbarView {
            self.target.last_view().expect("rendered view")
        }

        fn tabs(&self) -> Vec<String> {
            self.view().tabs.into_iter().map(|tab| tab.title).collect()
        }
    }

    fn user(uid: &str, email: &str) -> Option<AuthUser> {
        Some(AuthUser {
            uid: uid.to_string(),
            email: Some(email.to_string()),
            is_anonymous: false,
        })
    }

    #[test]
    fn visibility_follows_session_transitions() {
        let mut h = Harness::at("/index.html");
        h.engine.start();
        h.settle();
        assert_eq!(h.tabs(), vec!["Home", "Games"]);

        h.host.identity.emit(user("u1", "ada@example.com"));
        h.settle();
        assert_eq!(h.tabs(), vec!["Home", "Games", "Leaderboard", "Settings"]);
        assert!(h.view().show_settings);

        h.host
            .identity
            .emit(user("root", &nav_config().privileged_account));
        h.settle();
        assert!(h.tabs().contains(&"Admin Panel".to_string()));
    }

    #[test]
    fn stale_load_never_renders() {
        let mut h = Harness::at("/index.html");
        h.engine.start();
        h.host.identity.emit(user("u1", "ada@example.com"));
        h.settle();

        let state = h.engine.state();
        let registry = state.registry.expect("registry");
        assert_eq!(registry.generation, 2);
        assert!(registry.session.signed_in);
        assert_eq!(h.target.views().len(), 1);
    }

    #[test]
    fn sign_out_on_admin_page_redirects() {
        let mut h = Harness::at("/admin.html");
        h.host
            .identity
            .emit(user("root", &nav_config().privileged_account));
        h.engine.start();
        h.settle();
        assert!(h.host.navigator.replaced().is_empty());

        h.engine.dispatch(NavAction::RequestSignOut);
        h.settle();

        assert_eq!(
            h.host.navigator.replaced(),
            vec![nav_config().redirect.target.clone()]
        );
    }

    #[test]
    fn sign_out_on_authentication_page_stays() {
        let mut h = Harness::at("/authentication.html");
        h.host.identity.emit(user("u1", "ada@example.com"));
        h.engine.start();
        h.settle();

        h.engine.dispatch(NavAction::RequestSignOut);
        h.settle();

        assert!(h.host.navigator.replaced().is_empty());
        assert_eq!(h.view().account.label, "Not signed in");
    }

    #[test]
    fn signed_out_boot_on_protected_page_redirects() {
        let mut h = Harness::at("/settings.html");
        h.engine.start();
        h.settle();

        assert_eq!(h.host.navigator.replaced().len(), 1);
    }

    #[test]
    fn pin_hint_shows_once_and_hides_after_delay() {
        let mut h = Harness::at("/index.html");
        h.engine.start();
        h.settle();

        h.engine.dispatch(NavAction::TogglePin {
            title: "Games".to_string(),
        });
        assert!(h.view().hint_visible);
        assert_eq!(
            h.host.local.get_item(&nav_config().hint_key()).as_deref(),
            Some("true")
        );

        h.host
            .scheduler
            .advance(u64::from(nav_config().hint_visible_ms));
        assert!(!h.view().hint_visible);

        h.engine.dispatch(NavAction::TogglePin {
            title: "Home".to_string(),
        });
        assert!(!h.view().hint_visible);
        assert_eq!(h.tabs(), vec!["Games", "Home"]);
    }

    #[test]
    fn pins_and_hint_flag_survive_reload() {
        let mut first = Harness::at("/index.html");
        first.engine.start();
        first.settle();
        first.engine.dispatch(NavAction::TogglePin {
            title: "Games".to_string(),
        });

        let reloaded = MemoryHost {
            local: first.host.local.clone(),
            ..MemoryHost::at("/index.html")
        };
        let mut second = Harness::with_host(reloaded);
        second.engine.start();
        second.settle();

        let state = second.engine.state();
        assert_eq!(state.pinned.len(), 1);
        assert!(state.hint_shown);
        assert_eq!(second.tabs(), vec!["Games", "Home"]);
        assert!(second.view().tabs[0].pinned);
    }

    #[test]
    fn malformed_pins_boot_empty() {
        let host = MemoryHost::at("/index.html");
        host.local
            .set_item(&nav_config().pins_key(), "[{\"title\": 3}]")
            .expect("seed");
        let mut h = Harness::with_host(host);

        h.engine.start();
        h.settle();

        assert!(h.engine.state().pinned.is_empty());
        assert_eq!(h.tabs(), vec!["Home", "Games"]);
    }

    #[test]
    fn menus_are_exclusive_and_outside_click_is_idempotent() {
        let mut h = Harness::at("/index.html");
        h.engine.start();
        h.settle();

        h.engine.dispatch(NavAction::ToggleMenu {
            menu: NavMenu::Account,
        });
        h.engine.dispatch(NavAction::ToggleMenu { menu: NavMenu::Pin });
        assert_eq!(h.view().open_menu, Some(NavMenu::Pin));

        h.engine.dispatch(NavAction::DismissMenus);
        let renders = h.target.views().len();
        h.engine.dispatch(NavAction::DismissMenus);

        assert_eq!(h.view().open_menu, None);
        assert_eq!(h.target.views().len(), renders);
    }

    #[test]
    fn guest_sign_in_from_account_menu() {
        let mut h = Harness::at("/index.html");
        h.engine.start();
        h.settle();

        h.engine.dispatch(NavAction::RequestSignIn);
        h.settle();

        assert_eq!(h.host.identity.requests(), vec!["anonymous".to_string()]);
        assert_eq!(h.view().account.label, "Guest");
    }

    #[test]
    fn failed_sign_out_keeps_session() {
        let mut h = Harness::at("/settings.html");
        h.host.identity.emit(user("u1", "ada@example.com"));
        h.engine.start();
        h.settle();
        h.host.identity.fail_requests("network down");

        h.engine.dispatch(NavAction::RequestSignOut);
        h.settle();

        assert!(h.engine.state().session.signed_in);
        assert!(h.host.navigator.replaced().is_empty());
    }
}
