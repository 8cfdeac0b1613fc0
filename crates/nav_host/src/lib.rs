//! Typed host contracts consumed by the navbar runtime.
//!
//! This crate is the API boundary between the navbar engine and its environment: key/value
//! storage, the identity provider, the remote document collection, location/navigation, and
//! deferred scheduling. Browser adapters live in `nav_host_web`; the in-memory implementations
//! here back headless tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod documents;
pub mod host;
pub mod identity;
pub mod location;
pub mod scheduler;
pub mod storage;

pub use documents::{
    DocumentCollection, DocumentFuture, MemoryDocumentCollection, NoopDocumentCollection,
};
pub use host::{MemoryHost, NavHostServices};
pub use identity::{
    AuthStateCallback, AuthUser, IdentityFuture, IdentityProvider, MemoryIdentityProvider,
    NoopIdentityProvider,
};
pub use location::{Location, MemoryLocation, Navigator, RecordingNavigator};
pub use scheduler::{sleep, Scheduler, Sleep, Task, TaskId, VirtualScheduler};
pub use storage::{
    load_json_with, save_json_with, KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore,
};
