//! Signal-backed render target that measures and scrolls the mounted tab strip.

use leptos::*;

use crate::{
    render::{NavbarView, RenderTarget},
    scroll::{FadeState, ScrollMetrics, TabGeometry},
};

/// DOM id of the horizontally scrolling tab strip.
pub const TAB_STRIP_ID: &str = "navbar-tab-strip";

#[cfg(target_arch = "wasm32")]
mod strip {
    use wasm_bindgen::JsCast;

    use super::TAB_STRIP_ID;
    use crate::scroll::{ScrollMetrics, TabGeometry};

    fn tab_strip() -> Option<web_sys::HtmlElement> {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(TAB_STRIP_ID))
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
    }

    pub fn metrics() -> Option<ScrollMetrics> {
        let strip = tab_strip()?;
        Some(ScrollMetrics {
            scroll_left: strip.scroll_left(),
            scroll_width: strip.scroll_width(),
            client_width: strip.client_width(),
        })
    }

    pub fn jump_to(left: i32) {
        if let Some(strip) = tab_strip() {
            strip.set_scroll_left(left);
        }
    }

    pub fn smooth_scroll_to(left: i32) {
        let Some(strip) = tab_strip() else {
            return;
        };
        let options = web_sys::ScrollToOptions::new();
        options.set_left(f64::from(left));
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        strip.scroll_to_with_scroll_to_options(&options);
    }

    pub fn active_tab() -> Option<TabGeometry> {
        let tab = tab_strip()?
            .query_selector(".navbar-tab.active")
            .ok()
            .flatten()?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()?;
        Some(TabGeometry {
            offset_left: tab.offset_left(),
            width: tab.offset_width(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod strip {
    use crate::scroll::{ScrollMetrics, TabGeometry};

    pub fn metrics() -> Option<ScrollMetrics> {
        None
    }

    pub fn jump_to(_left: i32) {}

    pub fn smooth_scroll_to(_left: i32) {}

    pub fn active_tab() -> Option<TabGeometry> {
        None
    }
}

#[derive(Clone, Copy)]
/// Writes applied views and fades into Leptos signals read by [`crate::components::Navbar`].
pub struct LeptosRenderTarget {
    view: RwSignal<Option<NavbarView>>,
    fades: RwSignal<FadeState>,
}

impl LeptosRenderTarget {
    /// Creates a target backed by the given signals.
    pub fn new(view: RwSignal<Option<NavbarView>>, fades: RwSignal<FadeState>) -> Self {
        Self { view, fades }
    }
}

impl RenderTarget for LeptosRenderTarget {
    fn apply(&self, view: NavbarView) {
        self.view.set(Some(view));
    }

    fn tab_strip_metrics(&self) -> Option<ScrollMetrics> {
        strip::metrics()
    }

    fn set_tab_strip_scroll(&self, left: i32) {
        strip::jump_to(left);
    }

    fn smooth_scroll_tab_strip(&self, left: i32) {
        strip::smooth_scroll_to(left);
    }

    fn active_tab_geometry(&self) -> Option<TabGeometry> {
        strip::active_tab()
    }

    fn set_fades(&self, fades: FadeState) {
        if self.fades.get_untracked() != fades {
            self.fades.set(fades);
        }
    }
}
