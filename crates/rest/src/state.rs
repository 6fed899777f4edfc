//! Application state for the gallery API.
//!
//! Handlers share the document store, the email relay and the server
//! configuration through [`AppState`].

use std::sync::Arc;

use gallery_content::{EmailRelay, Gallery, InquirySettings};
use gallery_persistence::DocumentStore;

use crate::config::ServerConfig;

/// Shared application state for the gallery API.
///
/// # Example
///
/// ```rust,ignore
/// use gallery_rest::{AppState, ServerConfig};
/// use gallery_content::DisabledRelay;
/// use gallery_persistence::backends::memory::MemoryStore;
/// use std::sync::Arc;
///
/// let state = AppState::new(
///     Arc::new(MemoryStore::new()),
///     Arc::new(DisabledRelay),
///     ServerConfig::default(),
/// );
/// ```
pub struct AppState<S> {
    /// The document store.
    storage: Arc<S>,

    /// Where inquiries are delivered.
    relay: Arc<dyn EmailRelay>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// S sits behind an Arc and need not be Clone.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            relay: Arc::clone(&self.relay),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: DocumentStore> AppState<S> {
    /// Creates a new AppState.
    pub fn new(storage: Arc<S>, relay: Arc<dyn EmailRelay>, config: ServerConfig) -> Self {
        Self {
            storage,
            relay,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the document store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// A view builder over the shared store.
    pub fn gallery(&self) -> Gallery<Arc<S>> {
        Gallery::new(Arc::clone(&self.storage))
    }

    /// Returns the email relay.
    pub fn relay(&self) -> &dyn EmailRelay {
        self.relay.as_ref()
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Addressing for inquiry notifications.
    pub fn inquiry_settings(&self) -> InquirySettings {
        self.config.inquiry_settings()
    }
}
