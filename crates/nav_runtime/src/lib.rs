//! Session-aware navigation bar runtime.
//!
//! Identity notifications drive a reducer ([`reduce_nav`]) whose effects reload the page
//! registry, persist pins, and enforce the signed-out redirect. Each committed state renders
//! through a [`RenderTarget`]: Leptos signals in the browser, [`HeadlessRenderTarget`] in tests.

pub mod components;
pub mod config;
pub mod dom;
pub mod dropdown;
pub mod engine;
pub mod model;
pub mod persistence;
pub mod redirect;
pub mod reducer;
pub mod registry;
pub mod render;
pub mod runtime_context;
pub mod scroll;
pub mod session;
pub mod visibility;

pub use components::Navbar;
pub use config::{nav_config, ConfigError, NavConfig, RedirectConfig};
pub use engine::{NavEngine, Spawner};
pub use model::*;
pub use redirect::{classify_path, enforce_redirect, RedirectDecision};
pub use reducer::{reduce_nav, NavAction, NavEffect, ReducerError};
pub use registry::{load_pages, merge_pages, RegistryError};
pub use render::{describe_navbar, HeadlessRenderTarget, NavbarRenderer, NavbarView, RenderTarget};
pub use runtime_context::{use_navbar_runtime, NavbarProvider, NavbarRuntimeContext};
pub use scroll::{compute_fades, FadeState, ScrollFadeController, ScrollMetrics};
pub use visibility::filter_visible;
