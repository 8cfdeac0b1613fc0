//! Role and auth based page visibility.

use crate::model::{Page, SessionState};

/// Whether `session` may see `page`. First matching rule wins:
/// signed out sees public pages only; admin pages need the admin session; everything else is
/// visible to any signed-in viewer.
pub fn is_visible(page: &Page, session: &SessionState) -> bool {
    if !session.signed_in {
        return page.is_public;
    }
    if page.is_admin {
        return session.is_admin;
    }
    true
}

/// Returns the pages visible to `session`, preserving order.
pub fn filter_visible(pages: &[Page], session: &SessionState) -> Vec<Page> {
    pages
        .iter()
        .filter(|page| is_visible(page, session))
        .cloned()
        .collect()
}
