//! In-memory backend.
//!
//! Collections live in a `BTreeMap` keyed by document id, so full scans come
//! back in id order. Useful for tests and local development; nothing
//! survives a restart.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::core::{DocumentStore, validate_collection, validate_field};
use crate::error::StorageResult;
use crate::types::{Document, DocumentPatch};

type Collection = BTreeMap<String, Document>;

/// A process-local document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document synchronously. Intended for seeding fixtures.
    pub fn insert(&self, collection: &str, document: Document) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(document.id().to_string(), document);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_all(&self, collection: &str) -> StorageResult<Vec<Document>> {
        validate_collection(collection)?;
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StorageResult<Vec<Document>> {
        validate_collection(collection)?;
        validate_field(field)?;
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| doc.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn fetch_by_id(&self, collection: &str, id: &str) -> StorageResult<Option<Document>> {
        validate_collection(collection)?;
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn put(&self, collection: &str, document: Document) -> StorageResult<()> {
        validate_collection(collection)?;
        if document.id().is_empty() {
            return Err(crate::error::ValidationError::EmptyId {
                collection: collection.to_string(),
            }
            .into());
        }
        self.insert(collection, document);
        Ok(())
    }

    async fn merge_batch(
        &self,
        collection: &str,
        patches: &[DocumentPatch],
    ) -> StorageResult<usize> {
        validate_collection(collection)?;
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let mut written = 0;
        for patch in patches.iter().filter(|p| !p.is_empty()) {
            if let Some(doc) = docs.get_mut(&patch.id) {
                doc.merge(&patch.fields);
                written += 1;
            }
        }
        Ok(written)
    }

    async fn count(&self, collection: &str) -> StorageResult<u64> {
        validate_collection(collection)?;
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|docs| docs.len() as u64)
            .unwrap_or(0))
    }
}
