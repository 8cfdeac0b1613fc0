//! Compile-time host-strategy selection and host bundle assembly.

use std::rc::Rc;

use nav_host::{
    DocumentCollection, IdentityProvider, NavHostServices, NoopDocumentCollection,
    NoopIdentityProvider,
};

use crate::{
    WebDocumentCollection, WebIdentityProvider, WebLocalStore, WebLocation, WebNavigator,
    WebScheduler, WebSessionStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy.
pub enum HostStrategy {
    /// Identity and documents come from the page's `navbarHost` bridge.
    Browser,
    /// Identity and documents are stubbed; the navbar runs signed out on defaults.
    Stub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Stub => "stub",
    }
}

/// Builds the identity provider for the selected strategy.
pub fn identity_provider() -> Rc<dyn IdentityProvider> {
    match selected_host_strategy() {
        HostStrategy::Browser => Rc::new(WebIdentityProvider),
        HostStrategy::Stub => Rc::new(NoopIdentityProvider),
    }
}

/// Builds the document collection for the selected strategy.
pub fn document_collection() -> Rc<dyn DocumentCollection> {
    match selected_host_strategy() {
        HostStrategy::Browser => Rc::new(WebDocumentCollection),
        HostStrategy::Stub => Rc::new(NoopDocumentCollection),
    }
}

/// Assembles the browser host bundle consumed by the navbar runtime.
pub fn build_host_services() -> NavHostServices {
    NavHostServices {
        local: Rc::new(WebLocalStore),
        session: Rc::new(WebSessionStore),
        identity: identity_provider(),
        documents: document_collection(),
        location: Rc::new(WebLocation),
        navigator: Rc::new(WebNavigator),
        scheduler: Rc::new(WebScheduler),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_name_matches_selected_strategy() {
        let expected = if cfg!(feature = "host-stub") {
            "stub"
        } else {
            "browser"
        };
        assert_eq!(host_strategy_name(), expected);
    }
}
