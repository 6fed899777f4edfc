//! Core storage traits and abstractions.
//!
//! - [`DocumentStore`] - collection reads and the two write primitives
//! - [`BackendKind`] - identifies which backend serves a store

pub mod backend;
pub mod storage;

pub use backend::BackendKind;
pub use storage::{DocumentStore, validate_collection, validate_field};
