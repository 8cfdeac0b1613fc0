//! Navbar data model: pages, pins, session, and the render snapshot.

use serde::{Deserialize, Serialize};

/// Sort key used for pages without an explicit `order`.
pub const DEFAULT_PAGE_ORDER: f64 = 99.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A navigable destination with visibility flags and display metadata.
pub struct Page {
    /// Unique key within one page set.
    pub title: String,
    /// Link target, usually a file name such as `index.html`.
    pub url: String,
    /// Icon symbol id.
    pub icon: String,
    /// Visible to signed-out viewers.
    #[serde(default)]
    pub is_public: bool,
    /// Visible only to the privileged account.
    #[serde(default)]
    pub is_admin: bool,
    /// Explicit sort key; [`DEFAULT_PAGE_ORDER`] when absent.
    #[serde(default)]
    pub order: Option<f64>,
}

impl Page {
    /// Returns the effective sort key.
    pub fn sort_order(&self) -> f64 {
        self.order.unwrap_or(DEFAULT_PAGE_ORDER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A user-chosen shortcut. Display fields are cached at pin time and never re-validated.
pub struct PinnedPage {
    /// Title of the pinned page.
    pub title: String,
    /// Cached link target.
    pub url: String,
    /// Cached icon symbol id.
    pub icon: String,
}

impl From<&Page> for PinnedPage {
    fn from(page: &Page) -> Self {
        Self {
            title: page.title.clone(),
            url: page.url.clone(),
            icon: page.icon.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Authentication result derived from the latest identity-provider notification.
pub struct SessionState {
    /// Whether any session (including a guest session) is active.
    pub signed_in: bool,
    /// Provider user id.
    pub user_id: Option<String>,
    /// Verified account identifier shown in the account menu.
    pub account: Option<String>,
    /// Guest session.
    pub anonymous: bool,
    /// Account matches the configured privileged identifier.
    pub is_admin: bool,
}

impl SessionState {
    /// Signed-out session.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Label shown on the account menu.
    pub fn display_label(&self) -> String {
        if !self.signed_in {
            return "Not signed in".to_string();
        }
        if self.anonymous {
            return "Guest".to_string();
        }
        self.account
            .clone()
            .or_else(|| self.user_id.clone())
            .unwrap_or_else(|| "Signed in".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The two mutually exclusive navbar dropdowns.
pub enum NavMenu {
    /// Identity and sign-in/out menu.
    Account,
    /// Pin-management menu.
    Pin,
}

impl NavMenu {
    /// Stable DOM id fragment.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Pin => "pin",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Page set loaded for one auth transition, committed together with the session it was
/// loaded for.
pub struct LoadedRegistry {
    /// Auth transition the load belongs to.
    pub generation: u64,
    /// Session the pages are filtered for.
    pub session: SessionState,
    /// Merged page set.
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Complete navbar state. Replaced wholesale by [`crate::reducer::reduce_nav`].
pub struct NavState {
    /// Latest session notification, possibly ahead of [`NavState::registry`].
    pub session: SessionState,
    /// Monotonic auth-transition counter.
    pub generation: u64,
    /// Most recent committed page load; `None` until the first load completes.
    pub registry: Option<LoadedRegistry>,
    /// Pins in display order.
    pub pinned: Vec<PinnedPage>,
    /// Currently open dropdown.
    pub open_menu: Option<NavMenu>,
    /// One-time pin hint has been shown at some point (persisted).
    pub hint_shown: bool,
    /// Pin hint is on screen.
    pub hint_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
/// Everything one render needs. Recomputed on every render.
pub struct RenderSnapshot {
    /// Pages visible to the committed session.
    pub visible: Vec<Page>,
    /// Pins in display order.
    pub pinned: Vec<PinnedPage>,
    /// Session the visible pages were filtered for.
    pub session: SessionState,
    /// Title of the tab matching the current location.
    pub active_title: Option<String>,
    /// Currently open dropdown.
    pub open_menu: Option<NavMenu>,
    /// Pin hint is on screen.
    pub hint_visible: bool,
}
