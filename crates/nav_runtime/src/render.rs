//! Navbar description and the render pass that applies it to a [`RenderTarget`].

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use leptos::logging;
use nav_host::{KeyValueStore, Scheduler};

use crate::{
    model::{NavMenu, NavState, Page, PinnedPage, RenderSnapshot},
    persistence::{load_scroll_offset, save_scroll_offset},
    scroll::{centered_scroll_left, FadeState, ScrollFadeController, ScrollMetrics, TabGeometry},
    visibility::filter_visible,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One entry of the tab strip.
pub struct TabView {
    /// Page title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Icon symbol id.
    pub icon: String,
    /// Tab comes from the pin list.
    pub pinned: bool,
    /// Tab matches the current location.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One checkable entry of the pin menu.
pub struct PinMenuItem {
    /// Page title.
    pub title: String,
    /// Icon symbol id.
    pub icon: String,
    /// Page is currently pinned.
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Action offered by the account menu.
pub enum AccountAction {
    /// Start a guest session.
    SignIn,
    /// End the current session.
    SignOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account menu contents.
pub struct AccountView {
    /// Account, "Guest", or "Not signed in".
    pub label: String,
    /// Available action.
    pub action: AccountAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Declarative navbar contents produced from a [`RenderSnapshot`].
pub struct NavbarView {
    /// Pinned tabs in pin order, then unpinned visible pages in registry order.
    pub tabs: Vec<TabView>,
    /// Every visible page with its pinned state.
    pub pin_menu: Vec<PinMenuItem>,
    /// Offer "clear pins" (at least one pin exists).
    pub show_clear_pins: bool,
    /// Account menu.
    pub account: AccountView,
    /// Settings link is shown.
    pub show_settings: bool,
    /// One-time pin hint is shown.
    pub hint_visible: bool,
    /// Open dropdown.
    pub open_menu: Option<NavMenu>,
}

impl NavbarView {
    /// The active tab, if any.
    pub fn active_tab(&self) -> Option<&TabView> {
        self.tabs.iter().find(|tab| tab.active)
    }
}

fn tab_entries(visible: &[Page], pinned: &[PinnedPage]) -> Vec<TabView> {
    let pinned_tabs = pinned.iter().map(|pin| TabView {
        title: pin.title.clone(),
        url: pin.url.clone(),
        icon: pin.icon.clone(),
        pinned: true,
        active: false,
    });
    let page_tabs = visible
        .iter()
        .filter(|page| !pinned.iter().any(|pin| pin.title == page.title))
        .map(|page| TabView {
            title: page.title.clone(),
            url: page.url.clone(),
            icon: page.icon.clone(),
            pinned: false,
            active: false,
        });
    pinned_tabs.chain(page_tabs).collect()
}

/// Returns the title of the first tab whose url equals the last segment of `path`. An empty
/// segment matches the tab linking to `landing_file`.
pub fn active_title(tabs: &[TabView], path: &str, landing_file: &str) -> Option<String> {
    let segment = path.rsplit('/').next().unwrap_or("");
    let wanted = if segment.is_empty() {
        landing_file
    } else {
        segment
    };
    tabs.iter()
        .find(|tab| tab.url == wanted)
        .map(|tab| tab.title.clone())
}

/// Builds the snapshot for the committed registry, or `None` before the first load commits.
pub fn build_snapshot(state: &NavState, path: &str, landing_file: &str) -> Option<RenderSnapshot> {
    let registry = state.registry.as_ref()?;
    let visible = filter_visible(&registry.pages, &registry.session);
    let tabs = tab_entries(&visible, &state.pinned);
    Some(RenderSnapshot {
        active_title: active_title(&tabs, path, landing_file),
        visible,
        pinned: state.pinned.clone(),
        session: registry.session.clone(),
        open_menu: state.open_menu,
        hint_visible: state.hint_visible,
    })
}

/// Pure description of the navbar for `snapshot`.
pub fn describe_navbar(snapshot: &RenderSnapshot) -> NavbarView {
    let mut tabs = tab_entries(&snapshot.visible, &snapshot.pinned);
    if let Some(active) = snapshot.active_title.as_deref() {
        if let Some(tab) = tabs.iter_mut().find(|tab| tab.title == active) {
            tab.active = true;
        }
    }

    let pin_menu = snapshot
        .visible
        .iter()
        .map(|page| PinMenuItem {
            title: page.title.clone(),
            icon: page.icon.clone(),
            checked: snapshot.pinned.iter().any(|pin| pin.title == page.title),
        })
        .collect();

    let signed_in = snapshot.session.signed_in;
    NavbarView {
        tabs,
        pin_menu,
        show_clear_pins: !snapshot.pinned.is_empty(),
        account: AccountView {
            label: snapshot.session.display_label(),
            action: if signed_in {
                AccountAction::SignOut
            } else {
                AccountAction::SignIn
            },
        },
        show_settings: signed_in,
        hint_visible: snapshot.hint_visible,
        open_menu: snapshot.open_menu,
    }
}

/// Surface the navbar is rendered into.
pub trait RenderTarget {
    /// Replaces the navbar contents.
    fn apply(&self, view: NavbarView);
    /// Current tab strip geometry, when mounted.
    fn tab_strip_metrics(&self) -> Option<ScrollMetrics>;
    /// Jumps the tab strip to `left`.
    fn set_tab_strip_scroll(&self, left: i32);
    /// Smooth-scrolls the tab strip to `left`.
    fn smooth_scroll_tab_strip(&self, left: i32);
    /// Geometry of the active tab, when one is rendered.
    fn active_tab_geometry(&self) -> Option<TabGeometry>;
    /// Shows or hides the edge fades.
    fn set_fades(&self, fades: FadeState);
}

#[derive(Default)]
struct HeadlessInner {
    views: Vec<NavbarView>,
    metrics: Option<ScrollMetrics>,
    active: Option<TabGeometry>,
    jumps: Vec<i32>,
    smooth_scrolls: Vec<i32>,
    fades: Vec<FadeState>,
}

#[derive(Clone, Default)]
/// Render target that records every call, for headless runs and tests.
pub struct HeadlessRenderTarget {
    inner: Rc<RefCell<HeadlessInner>>,
}

impl HeadlessRenderTarget {
    /// Sets the strip geometry reported to the renderer.
    pub fn set_metrics(&self, metrics: Option<ScrollMetrics>) {
        self.inner.borrow_mut().metrics = metrics;
    }

    /// Sets the active tab geometry reported to the renderer.
    pub fn set_active_geometry(&self, geometry: Option<TabGeometry>) {
        self.inner.borrow_mut().active = geometry;
    }

    /// Every applied view, oldest first.
    pub fn views(&self) -> Vec<NavbarView> {
        self.inner.borrow().views.clone()
    }

    /// The most recently applied view.
    pub fn last_view(&self) -> Option<NavbarView> {
        self.inner.borrow().views.last().cloned()
    }

    /// Instant scroll positions set so far.
    pub fn jumps(&self) -> Vec<i32> {
        self.inner.borrow().jumps.clone()
    }

    /// Smooth scroll targets requested so far.
    pub fn smooth_scrolls(&self) -> Vec<i32> {
        self.inner.borrow().smooth_scrolls.clone()
    }

    /// Fade states applied so far.
    pub fn fades(&self) -> Vec<FadeState> {
        self.inner.borrow().fades.clone()
    }
}

impl RenderTarget for HeadlessRenderTarget {
    fn apply(&self, view: NavbarView) {
        self.inner.borrow_mut().views.push(view);
    }

    fn tab_strip_metrics(&self) -> Option<ScrollMetrics> {
        self.inner.borrow().metrics
    }

    fn set_tab_strip_scroll(&self, left: i32) {
        let mut inner = self.inner.borrow_mut();
        inner.jumps.push(left);
        if let Some(metrics) = inner.metrics.as_mut() {
            metrics.scroll_left = left;
        }
    }

    fn smooth_scroll_tab_strip(&self, left: i32) {
        self.inner.borrow_mut().smooth_scrolls.push(left);
    }

    fn active_tab_geometry(&self) -> Option<TabGeometry> {
        self.inner.borrow().active
    }

    fn set_fades(&self, fades: FadeState) {
        self.inner.borrow_mut().fades.push(fades);
    }
}

/// Applies snapshots to a [`RenderTarget`] and manages scroll continuity between renders.
///
/// Each render saves the strip offset (except the first), replaces the contents, and on the next
/// paint frame restores the saved offset and recomputes fades. The first render that has an
/// active tab also centers it; that happens at most once.
pub struct NavbarRenderer {
    target: Rc<dyn RenderTarget>,
    session_store: Rc<dyn KeyValueStore>,
    scroll_key: String,
    scheduler: Rc<dyn Scheduler>,
    fades: ScrollFadeController,
    first_render: Cell<bool>,
}

impl NavbarRenderer {
    /// Creates a renderer whose scroll offset lives in `session_store` under `scroll_key`.
    pub fn new(
        target: Rc<dyn RenderTarget>,
        session_store: Rc<dyn KeyValueStore>,
        scroll_key: String,
        scheduler: Rc<dyn Scheduler>,
        settle_ms: u32,
    ) -> Self {
        let fades = ScrollFadeController::new(target.clone(), scheduler.clone(), settle_ms);
        Self {
            target,
            session_store,
            scroll_key,
            scheduler,
            fades,
            first_render: Cell::new(true),
        }
    }

    /// Fade controller for wiring tab strip scroll events.
    pub fn fades(&self) -> &ScrollFadeController {
        &self.fades
    }

    /// Renders `snapshot`.
    pub fn render(&self, snapshot: &RenderSnapshot) {
        let first = self.first_render.replace(false);
        if !first {
            if let Some(metrics) = self.target.tab_strip_metrics() {
                if let Err(err) = save_scroll_offset(
                    self.session_store.as_ref(),
                    &self.scroll_key,
                    metrics.scroll_left,
                ) {
                    logging::warn!("navbar scroll offset save failed: {err}");
                }
            }
        }

        let view = describe_navbar(snapshot);
        let center = first && view.active_tab().is_some();
        self.target.apply(view);

        let target = self.target.clone();
        let store = self.session_store.clone();
        let key = self.scroll_key.clone();
        let fades = self.fades.clone();
        self.scheduler.request_frame(Box::new(move || {
            if let Some(offset) = load_scroll_offset(store.as_ref(), &key) {
                target.set_tab_strip_scroll(offset);
            }
            fades.recompute();
            if center {
                if let (Some(tab), Some(metrics)) =
                    (target.active_tab_geometry(), target.tab_strip_metrics())
                {
                    fades.smooth_scroll_to(centered_scroll_left(tab, metrics));
                }
            }
        }));
    }
}
