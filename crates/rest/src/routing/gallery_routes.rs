//! Gallery route configuration.

use axum::{
    Router,
    routing::{get, post},
};
use gallery_persistence::DocumentStore;

use crate::handlers;
use crate::state::AppState;

/// Creates all gallery API routes.
///
/// # Routes
///
/// ## Operational
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Listings
/// - `GET /api/artists`
/// - `GET /api/exhibitions`
/// - `GET /api/headquarters`
/// - `GET /api/highlights`
/// - `GET /api/performances`
/// - `GET /api/team`
///
/// ## Detail pages
/// - `GET /api/artists/{slug}`
/// - `GET /api/artworks/{slug}`
/// - `GET /api/exhibitions/{slug}`
/// - `GET /api/performances/{slug}`
///
/// ## Forms
/// - `POST /api/inquiries`
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        // Operational routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        // Listings
        .route("/api/artists", get(handlers::artists_handler::<S>))
        .route("/api/exhibitions", get(handlers::exhibitions_handler::<S>))
        .route("/api/headquarters", get(handlers::headquarters_handler::<S>))
        .route("/api/highlights", get(handlers::highlights_handler::<S>))
        .route("/api/performances", get(handlers::performances_handler::<S>))
        .route("/api/team", get(handlers::team_handler::<S>))
        // Detail pages
        .route("/api/artists/{slug}", get(handlers::artist_handler::<S>))
        .route("/api/artworks/{slug}", get(handlers::artwork_handler::<S>))
        .route(
            "/api/exhibitions/{slug}",
            get(handlers::exhibition_handler::<S>),
        )
        .route(
            "/api/performances/{slug}",
            get(handlers::performance_handler::<S>),
        )
        // Forms
        .route("/api/inquiries", post(handlers::inquiry_handler::<S>))
        // State
        .with_state(state)
}
