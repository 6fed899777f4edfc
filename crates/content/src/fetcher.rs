//! Entity fetching.
//!
//! [`Fetcher`] is a thin, logged view over a [`DocumentStore`] that hands
//! back [`Record`]s with their ids merged in. It never retries and never
//! paginates; callers decide how to degrade on a [`FetchError`].

use gallery_persistence::{DocumentStore, StorageError};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::model::Record;

/// A failed read against the document store.
#[derive(Debug, Error)]
#[error("failed to read '{collection}': {source}")]
pub struct FetchError {
    /// The collection being read.
    pub collection: String,
    /// The underlying store error.
    #[source]
    pub source: StorageError,
}

impl FetchError {
    fn logged(collection: &str, source: StorageError) -> Self {
        error!(collection = %collection, error = %source, "Document store read failed");
        Self {
            collection: collection.to_string(),
            source,
        }
    }
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Reads records from a document store.
#[derive(Debug, Clone)]
pub struct Fetcher<S> {
    store: S,
}

impl<S: DocumentStore> Fetcher<S> {
    /// Creates a fetcher over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads every record in a collection.
    pub async fn fetch_all(&self, collection: &str) -> FetchResult<Vec<Record>> {
        debug!(collection = %collection, "Fetching collection");
        let documents = self
            .store
            .fetch_all(collection)
            .await
            .map_err(|e| FetchError::logged(collection, e))?;
        Ok(documents.into_iter().map(Record::from).collect())
    }

    /// Reads the records whose `field` equals `value`.
    pub async fn fetch_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> FetchResult<Vec<Record>> {
        debug!(collection = %collection, field = %field, "Fetching matching records");
        let documents = self
            .store
            .fetch_where(collection, field, value)
            .await
            .map_err(|e| FetchError::logged(collection, e))?;
        Ok(documents.into_iter().map(Record::from).collect())
    }

    /// Reads one record by its store id.
    pub async fn fetch_by_id(&self, collection: &str, id: &str) -> FetchResult<Option<Record>> {
        debug!(collection = %collection, id = %id, "Fetching record");
        let document = self
            .store
            .fetch_by_id(collection, id)
            .await
            .map_err(|e| FetchError::logged(collection, e))?;
        Ok(document.map(Record::from))
    }

    /// Finds a record by public slug, falling back to the raw id.
    pub async fn fetch_by_slug(
        &self,
        collection: &str,
        slug_field: &str,
        slug: &str,
    ) -> FetchResult<Option<Record>> {
        let by_slug = self
            .fetch_where(collection, slug_field, &Value::String(slug.to_string()))
            .await?;
        if let Some(record) = by_slug.into_iter().next() {
            return Ok(Some(record));
        }
        self.fetch_by_id(collection, slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_persistence::backends::memory::MemoryStore;
    use gallery_persistence::Document;
    use serde_json::json;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert(
            "artworks",
            Document::from_value("w1", json!({"title": "Dune", "artworkSlug": "dune"})).unwrap(),
        );
        store.insert(
            "artworks",
            Document::from_value("w2", json!({"title": "Tide"})).unwrap(),
        );
        store
    }

    #[tokio::test]
    async fn test_fetch_all_merges_ids() {
        let fetcher = Fetcher::new(store());
        let records = fetcher.fetch_all("artworks").await.unwrap();
        let ids: Vec<_> = records.iter().map(Record::id).collect();
        assert_eq!(ids, vec!["w1", "w2"]);
    }

    #[tokio::test]
    async fn test_fetch_by_slug_falls_back_to_id() {
        let fetcher = Fetcher::new(store());
        let by_slug = fetcher.fetch_by_slug("artworks", "artworkSlug", "dune").await.unwrap();
        assert_eq!(by_slug.unwrap().id(), "w1");

        let by_id = fetcher.fetch_by_slug("artworks", "artworkSlug", "w2").await.unwrap();
        assert_eq!(by_id.unwrap().id(), "w2");

        let missing = fetcher.fetch_by_slug("artworks", "artworkSlug", "nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_invalid_collection_is_a_fetch_error() {
        let fetcher = Fetcher::new(store());
        let err = fetcher.fetch_all("bad name").await.unwrap_err();
        assert_eq!(err.collection, "bad name");
    }
}
