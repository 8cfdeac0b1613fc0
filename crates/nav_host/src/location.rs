//! Page location and navigation capabilities.

use std::{cell::RefCell, rc::Rc};

/// Read access to the current document path.
pub trait Location {
    /// Returns the current path, for example `/games/snake.html`.
    fn pathname(&self) -> String;
}

/// Navigation that leaves no history entry behind.
pub trait Navigator {
    /// Replaces the current document with `url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the host refuses the navigation.
    fn replace(&self, url: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
/// Fixed in-memory location.
pub struct MemoryLocation {
    path: String,
}

impl MemoryLocation {
    /// Creates a location positioned at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
        }
    }
}

impl Location for MemoryLocation {
    fn pathname(&self) -> String {
        self.path.clone()
    }
}

#[derive(Debug, Clone, Default)]
/// Navigator that records requested URLs instead of navigating.
pub struct RecordingNavigator {
    replaced: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    /// Returns every URL passed to [`Navigator::replace`], in order.
    pub fn replaced(&self) -> Vec<String> {
        self.replaced.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, url: &str) -> Result<(), String> {
        self.replaced.borrow_mut().push(url.to_string());
        Ok(())
    }
}
