//! Core types for stored documents.

pub mod document;

pub use document::{Document, DocumentPatch};
