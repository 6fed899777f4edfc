//! Error types for the persistence layer.
//!
//! Errors are split between problems with the caller's request
//! ([`ValidationError`]) and problems inside the store itself
//! ([`BackendError`]). Both roll up into [`StorageError`].

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The request was malformed (bad collection name, bad field path).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend failed to execute the request.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true if the error originates from the backend rather than the caller.
    pub fn is_backend(&self) -> bool {
        matches!(self, StorageError::Backend(_))
    }
}

/// Errors caused by an invalid request.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The collection name is empty or contains forbidden characters.
    #[error("invalid collection name: '{collection}'")]
    InvalidCollection { collection: String },

    /// The field name cannot be used in an equality filter.
    #[error("invalid field name '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// The document id is empty.
    #[error("document id must not be empty in collection '{collection}'")]
    EmptyId { collection: String },

    /// The document body is not a JSON object.
    #[error("document {collection}/{id} is not a JSON object")]
    NotAnObject { collection: String, id: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
