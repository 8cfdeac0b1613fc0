//! Session-loss redirect policy.

use leptos::logging;
use nav_host::{Location, Navigator};

use crate::config::RedirectConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of classifying a path when the session is lost.
pub enum RedirectDecision {
    /// Authentication, not-found, or root landing page; never redirected.
    Exempt,
    /// Content page that requires a session.
    Protected,
    /// Landing page of the games sub-section.
    SectionLanding,
    /// Nothing to enforce.
    Stay,
}

impl RedirectDecision {
    /// Whether the decision forces navigation away.
    pub const fn should_redirect(self) -> bool {
        matches!(self, Self::Protected | Self::SectionLanding)
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// Classifies `path`. The exempt check short-circuits the others.
pub fn classify_path(path: &str, policy: &RedirectConfig) -> RedirectDecision {
    let file = file_name(path);
    let in_games = path.contains(&policy.games_section);

    let exempt = path.contains(&policy.authentication_file)
        || path.contains(&policy.not_found_file)
        || (file == policy.landing_file && !in_games);
    if exempt {
        return RedirectDecision::Exempt;
    }

    let unguarded = [
        policy.landing_file.as_str(),
        policy.authentication_file.as_str(),
        policy.not_found_file.as_str(),
        "",
    ];
    if !unguarded.contains(&file) {
        return RedirectDecision::Protected;
    }
    if in_games && (file == policy.games_landing_file || file.is_empty()) {
        return RedirectDecision::SectionLanding;
    }
    RedirectDecision::Stay
}

/// Evaluates the guard for the current location and navigates away without leaving a history
/// entry when required. Returns the decision taken.
pub fn enforce_redirect(
    location: &dyn Location,
    navigator: &dyn Navigator,
    policy: &RedirectConfig,
) -> RedirectDecision {
    let path = location.pathname();
    let decision = classify_path(&path, policy);
    if decision.should_redirect() {
        if let Err(err) = navigator.replace(&policy.target) {
            logging::warn!("navbar redirect from `{path}` failed: {err}");
        }
    }
    decision
}

#[cfg(test)]
mod tests {
    use nav_host::{MemoryLocation, RecordingNavigator};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::nav_config;

    fn policy() -> &'static RedirectConfig {
        &nav_config().redirect
    }

    #[test]
    fn exempt_pages_are_never_redirected() {
        for path in [
            "/authentication.html",
            "/games/authentication.html",
            "/404.html",
            "/index.html",
        ] {
            assert_eq!(classify_path(path, policy()), RedirectDecision::Exempt, "{path}");
        }
    }

    #[test]
    fn content_pages_are_protected() {
        for path in ["/admin.html", "/settings.html", "/games/snake.html"] {
            assert_eq!(
                classify_path(path, policy()),
                RedirectDecision::Protected,
                "{path}"
            );
        }
    }

    #[test]
    fn games_landing_redirects_but_root_does_not() {
        assert_eq!(
            classify_path("/games/index.html", policy()),
            RedirectDecision::SectionLanding
        );
        assert_eq!(
            classify_path("/games/", policy()),
            RedirectDecision::SectionLanding
        );
        assert_eq!(classify_path("/", policy()), RedirectDecision::Stay);
    }

    #[test]
    fn sign_out_on_admin_page_replaces_location() {
        let location = MemoryLocation::new("/admin.html");
        let navigator = RecordingNavigator::default();

        let decision = enforce_redirect(&location, &navigator, policy());

        assert_eq!(decision, RedirectDecision::Protected);
        assert_eq!(navigator.replaced(), vec![policy().target.clone()]);
    }

    #[test]
    fn sign_out_on_authentication_page_is_blocked() {
        let location = MemoryLocation::new("/authentication.html");
        let navigator = RecordingNavigator::default();

        let decision = enforce_redirect(&location, &navigator, policy());

        assert_eq!(decision, RedirectDecision::Exempt);
        assert!(navigator.replaced().is_empty());
    }
}
