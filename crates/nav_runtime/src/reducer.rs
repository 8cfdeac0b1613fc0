//! Reducer actions, side-effect intents, and transition logic for the navbar runtime.

use thiserror::Error;

use crate::{
    dropdown::toggle_menu,
    model::{LoadedRegistry, NavMenu, NavState, Page, PinnedPage, SessionState},
    visibility::filter_visible,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_nav`] to mutate [`NavState`].
pub enum NavAction {
    /// Restore persisted pins and the hint flag at boot.
    HydratePersisted {
        /// Persisted pins in display order.
        pinned: Vec<PinnedPage>,
        /// Persisted hint flag.
        hint_shown: bool,
    },
    /// Identity provider reported a new session.
    SessionChanged {
        /// Derived session.
        session: SessionState,
    },
    /// A page load started by [`NavEffect::LoadPages`] finished.
    PagesLoaded {
        /// Auth transition the load was started for.
        generation: u64,
        /// Merged page set.
        pages: Vec<Page>,
    },
    /// Toggle one dropdown.
    ToggleMenu {
        /// Menu to toggle.
        menu: NavMenu,
    },
    /// Close any open dropdown (outside click or `Escape`).
    DismissMenus,
    /// Pin or unpin a page by title.
    TogglePin {
        /// Page title.
        title: String,
    },
    /// Remove every pin.
    ClearPins,
    /// Hide the pin hint once its display time elapsed.
    HideHint,
    /// Start a guest session from the account menu.
    RequestSignIn,
    /// End the session from the account menu.
    RequestSignOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_nav`] and executed by the engine.
pub enum NavEffect {
    /// Load the page registry for an auth transition.
    LoadPages {
        /// Transition being served.
        generation: u64,
    },
    /// Re-render from the committed state.
    Render,
    /// Persist the full pin list.
    PersistPins,
    /// Persist the one-time hint flag.
    PersistHintShown,
    /// Hide the pin hint after its display time.
    ScheduleHintHide,
    /// Evaluate the redirect guard for the current location.
    EnforceRedirect,
    /// Ask the identity provider for a guest session.
    SignInAnonymous,
    /// Ask the identity provider to end the session.
    SignOut,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Reducer failures. None of them change state.
pub enum ReducerError {
    /// Pin requested for a page the viewer cannot see.
    #[error("page `{0}` is not visible and cannot be pinned")]
    UnknownPage(String),
    /// A page load finished after a newer auth transition started.
    #[error("page load for generation {generation} superseded by generation {current}")]
    StaleLoad {
        /// Generation of the finished load.
        generation: u64,
        /// Current generation.
        current: u64,
    },
}

fn set_open_menu(state: &mut NavState, next: Option<NavMenu>, effects: &mut Vec<NavEffect>) {
    if state.open_menu != next {
        state.open_menu = next;
        effects.push(NavEffect::Render);
    }
}

fn toggle_pin(state: &mut NavState, title: String) -> Result<Vec<NavEffect>, ReducerError> {
    if let Some(index) = state.pinned.iter().position(|pin| pin.title == title) {
        state.pinned.remove(index);
        return Ok(vec![NavEffect::PersistPins, NavEffect::Render]);
    }

    let page = state
        .registry
        .as_ref()
        .and_then(|registry| {
            filter_visible(&registry.pages, &registry.session)
                .into_iter()
                .find(|page| page.title == title)
        })
        .ok_or(ReducerError::UnknownPage(title))?;
    state.pinned.push(PinnedPage::from(&page));

    let mut effects = vec![NavEffect::PersistPins];
    if !state.hint_shown {
        state.hint_shown = true;
        state.hint_visible = true;
        effects.push(NavEffect::PersistHintShown);
        effects.push(NavEffect::ScheduleHintHide);
    }
    effects.push(NavEffect::Render);
    Ok(effects)
}

/// Applies `action` to `state` and returns the side effects to run.
///
/// # Errors
///
/// Returns [`ReducerError`] when the action does not apply; `state` is left untouched.
pub fn reduce_nav(state: &mut NavState, action: NavAction) -> Result<Vec<NavEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        NavAction::HydratePersisted { pinned, hint_shown } => {
            state.pinned = pinned;
            state.hint_shown = hint_shown;
            effects.push(NavEffect::Render);
        }
        NavAction::SessionChanged { session } => {
            let signed_out = !session.signed_in;
            state.session = session;
            state.generation += 1;
            effects.push(NavEffect::LoadPages {
                generation: state.generation,
            });
            if signed_out {
                effects.push(NavEffect::EnforceRedirect);
            }
        }
        NavAction::PagesLoaded { generation, pages } => {
            if generation != state.generation {
                return Err(ReducerError::StaleLoad {
                    generation,
                    current: state.generation,
                });
            }
            state.registry = Some(LoadedRegistry {
                generation,
                session: state.session.clone(),
                pages,
            });
            effects.push(NavEffect::Render);
        }
        NavAction::ToggleMenu { menu } => {
            let next = toggle_menu(state.open_menu, menu);
            set_open_menu(state, next, &mut effects);
        }
        NavAction::DismissMenus => {
            set_open_menu(state, None, &mut effects);
        }
        NavAction::TogglePin { title } => return toggle_pin(state, title),
        NavAction::ClearPins => {
            if !state.pinned.is_empty() {
                state.pinned.clear();
                effects.push(NavEffect::PersistPins);
                effects.push(NavEffect::Render);
            }
        }
        NavAction::HideHint => {
            if state.hint_visible {
                state.hint_visible = false;
                effects.push(NavEffect::Render);
            }
        }
        NavAction::RequestSignIn => {
            set_open_menu(state, None, &mut effects);
            effects.push(NavEffect::SignInAnonymous);
        }
        NavAction::RequestSignOut => {
            set_open_menu(state, None, &mut effects);
            effects.push(NavEffect::SignOut);
        }
    }
    Ok(effects)
}
