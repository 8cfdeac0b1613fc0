//! Remote document collection contracts.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde_json::Value;

/// Object-safe boxed future used by [`DocumentCollection`] async methods.
pub type DocumentFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that lists raw JSON documents stored under a collection path.
pub trait DocumentCollection {
    /// Lists every document under `path`. An empty collection is `Ok(vec![])`.
    fn list_documents<'a>(&'a self, path: &'a str) -> DocumentFuture<'a, Result<Vec<Value>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Collection that is always empty.
pub struct NoopDocumentCollection;

impl DocumentCollection for NoopDocumentCollection {
    fn list_documents<'a>(
        &'a self,
        _path: &'a str,
    ) -> DocumentFuture<'a, Result<Vec<Value>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory collection keyed by path, with an optional injected failure.
pub struct MemoryDocumentCollection {
    documents: Rc<RefCell<HashMap<String, Vec<Value>>>>,
    failure: Rc<RefCell<Option<String>>>,
}

impl MemoryDocumentCollection {
    /// Replaces the documents stored under `path`.
    pub fn put(&self, path: impl Into<String>, documents: Vec<Value>) {
        self.documents.borrow_mut().insert(path.into(), documents);
    }

    /// Makes every list call fail with `message` until cleared with `None`.
    pub fn set_failure(&self, message: Option<String>) {
        *self.failure.borrow_mut() = message;
    }
}

impl DocumentCollection for MemoryDocumentCollection {
    fn list_documents<'a>(
        &'a self,
        path: &'a str,
    ) -> DocumentFuture<'a, Result<Vec<Value>, String>> {
        Box::pin(async move {
            if let Some(message) = self.failure.borrow().clone() {
                return Err(message);
            }
            Ok(self
                .documents
                .borrow()
                .get(path)
                .cloned()
                .unwrap_or_default())
        })
    }
}
