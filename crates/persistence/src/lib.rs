//! Gallery persistence layer.
//!
//! This crate is the document store boundary of the gallery content service.
//! Collections hold schemaless JSON documents keyed by a store-assigned id;
//! the only queries are full scans, single-field equality filters, and
//! lookups by id.
//!
//! # Architecture
//!
//! - [`core`] - the [`DocumentStore`](core::DocumentStore) trait
//! - [`types`] - [`Document`](types::Document) and [`DocumentPatch`](types::DocumentPatch)
//! - [`error`] - error types for all operations
//! - [`backends`] - in-memory and SQLite implementations
//!
//! # Quick Start
//!
//! ```ignore
//! use gallery_persistence::backends::memory::MemoryStore;
//! use gallery_persistence::core::DocumentStore;
//! use gallery_persistence::types::Document;
//! use serde_json::json;
//!
//! let store = MemoryStore::new();
//! let artwork = Document::from_value("w1", json!({"title": "Nocturne"})).unwrap();
//! store.put("artworks", artwork).await?;
//!
//! let found = store.fetch_by_id("artworks", "w1").await?;
//! assert_eq!(found.unwrap().to_value()["title"], "Nocturne");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use core::{BackendKind, DocumentStore};
pub use error::{StorageError, StorageResult};
pub use types::{Document, DocumentPatch};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
