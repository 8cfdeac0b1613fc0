//! Runtime provider and context wiring for the navbar.
//!
//! The provider owns the [`NavEngine`], boots it against the injected host bundle, and exposes
//! the rendered [`NavbarView`] to descendants. UI composition stays in [`crate::components`].

use std::{future::Future, pin::Pin, rc::Rc};

use leptos::*;
use nav_host::NavHostServices;

use crate::{
    config::nav_config,
    dom::LeptosRenderTarget,
    engine::{NavEngine, Spawner},
    reducer::NavAction,
    render::NavbarView,
    scroll::FadeState,
};

#[derive(Clone, Copy)]
/// Leptos context for reading the rendered navbar and dispatching [`NavAction`] values.
pub struct NavbarRuntimeContext {
    /// Engine owning navbar state and effect execution.
    pub engine: StoredValue<NavEngine>,
    /// Most recently rendered navbar; `None` until the first page load commits.
    pub view: RwSignal<Option<NavbarView>>,
    /// Tab strip edge fades.
    pub fades: RwSignal<FadeState>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<NavAction>,
}

impl NavbarRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: NavAction) {
        self.dispatch.call(action);
    }

    /// Forwards a tab strip scroll event to the fade controller.
    pub fn on_tab_strip_scroll(&self) {
        self.engine.get_value().fades().on_scroll();
    }
}

fn local_spawner() -> Spawner {
    Rc::new(|future: Pin<Box<dyn Future<Output = ()>>>| spawn_local(future))
}

#[component]
/// Provides [`NavbarRuntimeContext`] to descendant components and starts the session tracker.
pub fn NavbarProvider(
    /// Injected browser host bundle assembled by the entry layer.
    host_services: NavHostServices,
    children: Children,
) -> impl IntoView {
    let view = create_rw_signal(None::<NavbarView>);
    let fades = create_rw_signal(FadeState::default());
    let engine = NavEngine::new(
        host_services,
        nav_config(),
        Rc::new(LeptosRenderTarget::new(view, fades)),
        local_spawner(),
    );
    let engine = store_value(engine);

    let dispatch = Callback::new(move |action: NavAction| {
        engine.get_value().dispatch(action);
    });

    let runtime = NavbarRuntimeContext {
        engine,
        view,
        fades,
        dispatch,
    };
    provide_context(runtime);

    engine.get_value().start();

    children().into_view()
}

/// Returns the current [`NavbarRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`NavbarProvider`].
pub fn use_navbar_runtime() -> NavbarRuntimeContext {
    use_context::<NavbarRuntimeContext>().expect("NavbarRuntimeContext not provided")
}
