//! Mutual exclusion between the account and pin menus.

use crate::model::NavMenu;

/// Toggles `menu`. Opening one menu implicitly closes its peer since only one can be stored.
pub fn toggle_menu(current: Option<NavMenu>, menu: NavMenu) -> Option<NavMenu> {
    if current == Some(menu) {
        None
    } else {
        Some(menu)
    }
}

/// Whether a key press should close the open menu. Only `Escape` does, and only when a menu
/// is actually open.
pub fn dismiss_on_key(key: &str, open: Option<NavMenu>) -> bool {
    key == "Escape" && open.is_some()
}
