//! Core document storage trait.
//!
//! This module defines the [`DocumentStore`] trait: the full contract the
//! content layer has with a database. Reads are full scans, single-field
//! equality filters, and lookups by id. Writes are limited to whole-document
//! puts and batched field merges.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{StorageResult, ValidationError};
use crate::types::{Document, DocumentPatch};

/// Storage trait for schemaless document collections.
///
/// # Example
///
/// ```ignore
/// use gallery_persistence::core::DocumentStore;
/// use gallery_persistence::types::Document;
/// use serde_json::json;
///
/// async fn example<S: DocumentStore>(store: &S) -> gallery_persistence::StorageResult<()> {
///     let artist = Document::from_value("a1", json!({"name": "Lina", "slug": "lina"})).unwrap();
///     store.put("artists", artist).await?;
///
///     let by_slug = store.fetch_where("artists", "slug", &json!("lina")).await?;
///     assert_eq!(by_slug.len(), 1);
///
///     let by_id = store.fetch_by_id("artists", "a1").await?;
///     assert!(by_id.is_some());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Returns every document in a collection.
    ///
    /// Unknown collections are empty, not an error.
    async fn fetch_all(&self, collection: &str) -> StorageResult<Vec<Document>>;

    /// Returns the documents whose `field` is equal to `value`.
    ///
    /// Equality is JSON equality: `"true"` does not match `true`, and a
    /// document without the field never matches (not even `Value::Null`).
    async fn fetch_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StorageResult<Vec<Document>>;

    /// Returns a document by id, or `None` if it does not exist.
    async fn fetch_by_id(&self, collection: &str, id: &str) -> StorageResult<Option<Document>>;

    /// Inserts or replaces a whole document.
    async fn put(&self, collection: &str, document: Document) -> StorageResult<()>;

    /// Merges each patch into its target document as one batch.
    ///
    /// Patches whose target does not exist are skipped. Returns the number of
    /// documents written.
    async fn merge_batch(&self, collection: &str, patches: &[DocumentPatch])
    -> StorageResult<usize>;

    /// Counts the documents in a collection.
    async fn count(&self, collection: &str) -> StorageResult<u64> {
        Ok(self.fetch_all(collection).await?.len() as u64)
    }

    /// Checks that the backend can serve requests.
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<S> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn fetch_all(&self, collection: &str) -> StorageResult<Vec<Document>> {
        (**self).fetch_all(collection).await
    }

    async fn fetch_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StorageResult<Vec<Document>> {
        (**self).fetch_where(collection, field, value).await
    }

    async fn fetch_by_id(&self, collection: &str, id: &str) -> StorageResult<Option<Document>> {
        (**self).fetch_by_id(collection, id).await
    }

    async fn put(&self, collection: &str, document: Document) -> StorageResult<()> {
        (**self).put(collection, document).await
    }

    async fn merge_batch(
        &self,
        collection: &str,
        patches: &[DocumentPatch],
    ) -> StorageResult<usize> {
        (**self).merge_batch(collection, patches).await
    }

    async fn count(&self, collection: &str) -> StorageResult<u64> {
        (**self).count(collection).await
    }

    async fn health_check(&self) -> StorageResult<()> {
        (**self).health_check().await
    }
}

/// Checks that a collection name is non-empty and made of `[A-Za-z0-9_-]`.
pub fn validate_collection(collection: &str) -> Result<(), ValidationError> {
    let valid = !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidCollection {
            collection: collection.to_string(),
        })
    }
}

/// Checks that a field name can be used in an equality filter.
pub fn validate_field(field: &str) -> Result<(), ValidationError> {
    if field.is_empty() {
        return Err(ValidationError::InvalidField {
            field: field.to_string(),
            message: "field name is empty".to_string(),
        });
    }
    if field.contains('"') || field.contains('\\') {
        return Err(ValidationError::InvalidField {
            field: field.to_string(),
            message: "quotes and backslashes are not allowed".to_string(),
        });
    }
    Ok(())
}
