//! Browser (`wasm32`) implementations of [`nav_host`] service contracts.
//!
//! Storage maps onto `localStorage`/`sessionStorage`, scheduling onto `requestAnimationFrame`
//! and `setTimeout`, navigation onto `window.location`, and the identity provider plus document
//! collection onto the host page's `navbarHost` object through the JS bridge.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
mod bridge;
pub mod location;
pub mod scheduler;
pub mod storage;

pub use adapters::{
    build_host_services, document_collection, host_strategy_name, identity_provider,
    selected_host_strategy, HostStrategy,
};
pub use bridge::{WebDocumentCollection, WebIdentityProvider};
pub use location::{WebLocation, WebNavigator};
pub use scheduler::WebScheduler;
pub use storage::{WebLocalStore, WebSessionStore};
