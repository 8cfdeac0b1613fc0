//! Host service bundle shared by browser composition and headless tests.

use std::rc::Rc;

use crate::{
    DocumentCollection, IdentityProvider, KeyValueStore, Location, MemoryDocumentCollection,
    MemoryIdentityProvider, MemoryKeyValueStore, MemoryLocation, Navigator, RecordingNavigator,
    Scheduler, VirtualScheduler,
};

#[derive(Clone)]
/// Capabilities the navbar runtime consumes from its host.
pub struct NavHostServices {
    /// Durable per-origin storage (pins, one-time hint flag).
    pub local: Rc<dyn KeyValueStore>,
    /// Per-tab storage that survives page navigation (scroll offset).
    pub session: Rc<dyn KeyValueStore>,
    /// External identity provider.
    pub identity: Rc<dyn IdentityProvider>,
    /// Remote page registry source.
    pub documents: Rc<dyn DocumentCollection>,
    /// Current document location.
    pub location: Rc<dyn Location>,
    /// History-replacing navigation.
    pub navigator: Rc<dyn Navigator>,
    /// Paint-frame and timer scheduling.
    pub scheduler: Rc<dyn Scheduler>,
}

#[derive(Clone, Default)]
/// Fully in-memory host whose concrete handles stay reachable for assertions.
pub struct MemoryHost {
    /// Durable store.
    pub local: MemoryKeyValueStore,
    /// Session store.
    pub session: MemoryKeyValueStore,
    /// Scripted identity provider.
    pub identity: MemoryIdentityProvider,
    /// Scripted document collection.
    pub documents: MemoryDocumentCollection,
    /// Settable location.
    pub location: MemoryLocation,
    /// Recording navigator.
    pub navigator: RecordingNavigator,
    /// Virtual-time scheduler.
    pub scheduler: VirtualScheduler,
}

impl MemoryHost {
    /// Creates a host positioned at `path`.
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            location: MemoryLocation::new(path),
            ..Self::default()
        }
    }

    /// Returns a [`NavHostServices`] bundle backed by this host's handles.
    pub fn services(&self) -> NavHostServices {
        NavHostServices {
            local: Rc::new(self.local.clone()),
            session: Rc::new(self.session.clone()),
            identity: Rc::new(self.identity.clone()),
            documents: Rc::new(self.documents.clone()),
            location: Rc::new(self.location.clone()),
            navigator: Rc::new(self.navigator.clone()),
            scheduler: Rc::new(self.scheduler.clone()),
        }
    }
}
