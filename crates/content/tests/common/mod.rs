//! Shared fixtures for gallery-content integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use gallery_content::relay::{Delivery, EmailRelay, Notification, RelayError};
use gallery_persistence::backends::memory::MemoryStore;
use gallery_persistence::error::BackendError;
use gallery_persistence::{Document, DocumentPatch, DocumentStore, StorageError, StorageResult};

pub fn doc(id: &str, body: Value) -> Document {
    Document::from_value(id, body).expect("fixture must be an object")
}

fn unavailable(what: &str) -> StorageError {
    StorageError::Backend(BackendError::Unavailable {
        backend_name: "flaky".to_string(),
        message: format!("{} is unreachable", what),
    })
}

/// A memory store that can be told to fail specific reads, and that counts
/// merge traffic.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    failing_ids: Mutex<HashSet<String>>,
    failing_collections: Mutex<HashSet<String>>,
    pub merge_calls: AtomicUsize,
    pub merged_patches: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: &str, id: &str, body: Value) {
        self.inner.insert(collection, doc(id, body));
    }

    pub fn fail_id(&self, id: &str) {
        self.failing_ids.lock().insert(id.to_string());
    }

    pub fn fail_collection(&self, collection: &str) {
        self.failing_collections.lock().insert(collection.to_string());
    }

    pub fn merge_calls(&self) -> usize {
        self.merge_calls.load(Ordering::SeqCst)
    }

    pub fn merged_patches(&self) -> usize {
        self.merged_patches.load(Ordering::SeqCst)
    }

    fn check_collection(&self, collection: &str) -> StorageResult<()> {
        if self.failing_collections.lock().contains(collection) {
            return Err(unavailable(collection));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    fn backend_name(&self) -> &'static str {
        "flaky"
    }

    async fn fetch_all(&self, collection: &str) -> StorageResult<Vec<Document>> {
        self.check_collection(collection)?;
        self.inner.fetch_all(collection).await
    }

    async fn fetch_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StorageResult<Vec<Document>> {
        self.check_collection(collection)?;
        self.inner.fetch_where(collection, field, value).await
    }

    async fn fetch_by_id(&self, collection: &str, id: &str) -> StorageResult<Option<Document>> {
        self.check_collection(collection)?;
        if self.failing_ids.lock().contains(id) {
            return Err(unavailable(id));
        }
        self.inner.fetch_by_id(collection, id).await
    }

    async fn put(&self, collection: &str, document: Document) -> StorageResult<()> {
        self.inner.put(collection, document).await
    }

    async fn merge_batch(&self, collection: &str, patches: &[DocumentPatch]) -> StorageResult<usize> {
        self.merge_calls.fetch_add(1, Ordering::SeqCst);
        self.merged_patches.fetch_add(patches.len(), Ordering::SeqCst);
        self.inner.merge_batch(collection, patches).await
    }
}

/// A relay that records what it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingRelay {
    pub sent: Mutex<Vec<Notification>>,
    pub fail: bool,
}

impl RecordingRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl EmailRelay for RecordingRelay {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> Result<Delivery, RelayError> {
        self.sent.lock().push(notification.clone());
        if self.fail {
            return Err(RelayError::Rejected {
                status: 502,
                body: "upstream down".to_string(),
            });
        }
        Ok(Delivery {
            id: Some(format!("msg-{}", self.sent.lock().len())),
        })
    }
}
