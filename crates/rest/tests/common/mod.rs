//! Shared fixtures for gallery-rest integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::Value;

use gallery_content::relay::{Delivery, EmailRelay, Notification, RelayError};
use gallery_persistence::backends::memory::MemoryStore;
use gallery_persistence::error::BackendError;
use gallery_persistence::{Document, DocumentPatch, DocumentStore, StorageError, StorageResult};
use gallery_rest::{ServerConfig, create_app_with_config};

pub fn doc(id: &str, body: Value) -> Document {
    Document::from_value(id, body).expect("fixture must be an object")
}

/// A relay that records what it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingRelay {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
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
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailRelay for RecordingRelay {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> Result<Delivery, RelayError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(notification.clone());
        if self.fail {
            return Err(RelayError::Rejected {
                status: 503,
                body: "relay down".to_string(),
            });
        }
        Ok(Delivery {
            id: Some(format!("msg-{}", sent.len())),
        })
    }
}

/// A store whose every read fails.
#[derive(Debug, Default)]
pub struct DownStore;

fn down() -> StorageError {
    StorageError::Backend(BackendError::Unavailable {
        backend_name: "down".to_string(),
        message: "connection refused".to_string(),
    })
}

#[async_trait]
impl DocumentStore for DownStore {
    fn backend_name(&self) -> &'static str {
        "down"
    }

    async fn fetch_all(&self, _collection: &str) -> StorageResult<Vec<Document>> {
        Err(down())
    }

    async fn fetch_where(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> StorageResult<Vec<Document>> {
        Err(down())
    }

    async fn fetch_by_id(&self, _collection: &str, _id: &str) -> StorageResult<Option<Document>> {
        Err(down())
    }

    async fn put(&self, _collection: &str, _document: Document) -> StorageResult<()> {
        Err(down())
    }

    async fn merge_batch(
        &self,
        _collection: &str,
        _patches: &[DocumentPatch],
    ) -> StorageResult<usize> {
        Err(down())
    }

    async fn health_check(&self) -> StorageResult<()> {
        Err(down())
    }
}

/// Builds a test server over `store` with the given relay.
pub fn server<S>(store: S, relay: Arc<RecordingRelay>) -> TestServer
where
    S: DocumentStore + 'static,
{
    let app = create_app_with_config(store, relay, ServerConfig::for_testing());
    TestServer::new(app).expect("Failed to create test server")
}

/// A memory store seeded with a small catalogue.
pub fn catalogue() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(
        "artists",
        doc(
            "a1",
            serde_json::json!({
                "name": "Lina Ayoub",
                "slug": "lina-ayoub",
                "birthDate": "1988-03-14",
                "artworks": ["w1", "w-gone"]
            }),
        ),
    );
    store.insert(
        "artists",
        doc("a2", serde_json::json!({"name": "bruno Vidal", "slug": "bruno-vidal"})),
    );
    store.insert(
        "artworks",
        doc(
            "w1",
            serde_json::json!({"title": "Dune", "artworkSlug": "dune", "price": 1200}),
        ),
    );
    store.insert(
        "exhibitions",
        doc(
            "x1",
            serde_json::json!({"name": "Salt", "slug": "salt", "openingDate": "2023-09-01"}),
        ),
    );
    store.insert(
        "headquarters",
        doc(
            "hq1",
            serde_json::json!({"address": "1 Rue A", "exhibitions": ["x1"]}),
        ),
    );
    store.insert(
        "events",
        doc(
            "e1",
            serde_json::json!({
                "name": "Opening",
                "slug": "opening",
                "isFeatured": "true",
                "eventType": "performance",
                "dates": [{"date": "2024-05-01", "time": "19:00"}]
            }),
        ),
    );
    store.insert(
        "members",
        doc("m1", serde_json::json!({"name": "Olga", "team": true})),
    );
    store
}
