//! # gallery-rest - JSON API for the gallery site
//!
//! This crate exposes the listings, detail pages and inquiry form of the
//! gallery content service over HTTP. View models are built by
//! [`gallery_content`]; documents come from any
//! [`DocumentStore`](gallery_persistence::DocumentStore).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gallery_content::DisabledRelay;
//! use gallery_persistence::backends::memory::MemoryStore;
//! use gallery_rest::{create_app_with_config, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(MemoryStore::new(), Arc::new(DisabledRelay), config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Page | HTTP Method | URL Pattern |
//! |------|-------------|-------------|
//! | artists | GET | `/api/artists` |
//! | artist | GET | `/api/artists/{slug}` |
//! | artwork | GET | `/api/artworks/{slug}` |
//! | exhibitions | GET | `/api/exhibitions` |
//! | exhibition | GET | `/api/exhibitions/{slug}` |
//! | headquarters | GET | `/api/headquarters` |
//! | highlights | GET | `/api/highlights` |
//! | performances | GET | `/api/performances` |
//! | performance | GET | `/api/performances/{slug}` |
//! | team | GET | `/api/team` |
//! | inquiry | POST | `/api/inquiries` |
//!
//! Listings always answer `200`; a store failure shows up as an empty
//! `items` array plus an `error` message. Errors are JSON bodies of the
//! form `{"ok": false, "error": ..., "message": ...}`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit};
use gallery_content::EmailRelay;
use gallery_persistence::DocumentStore;
use http::StatusCode;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S, relay: Arc<dyn EmailRelay>) -> Router
where
    S: DocumentStore + 'static,
{
    create_app_with_config(storage, relay, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `storage` - The document store to read from
/// * `relay` - Where inquiries are delivered
/// * `config` - Server configuration
pub fn create_app_with_config<S>(
    storage: S,
    relay: Arc<dyn EmailRelay>,
    config: ServerConfig,
) -> Router
where
    S: DocumentStore + 'static,
{
    info!(
        backend = storage.backend_name(),
        relay = relay.name(),
        "Creating gallery API server"
    );

    let state = AppState::new(Arc::new(storage), relay, config.clone());

    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "gallery_rest={level},gallery_content={level},gallery_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
