//! Detail page handlers.
//!
//! A detail page is looked up by public slug. Unknown slugs answer 404 and
//! store failures answer 500; partially resolved references are not errors.

use axum::{
    Json,
    extract::{Path, State},
};
use gallery_content::view::models::{ArtistDetail, ArtworkDetail, EventView, ExhibitionView};
use gallery_persistence::DocumentStore;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

fn found<T>(value: Option<T>, kind: &'static str, slug: String) -> RestResult<Json<T>> {
    value
        .map(Json)
        .ok_or(RestError::NotFound { kind, slug })
}

/// `GET /api/artists/{slug}`
pub async fn artist_handler<S>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> RestResult<Json<ArtistDetail>>
where
    S: DocumentStore + 'static,
{
    debug!(slug = %slug, "Reading artist");
    let detail = state.gallery().artist(&slug).await?;
    found(detail, "artist", slug)
}

/// `GET /api/artworks/{slug}`
pub async fn artwork_handler<S>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> RestResult<Json<ArtworkDetail>>
where
    S: DocumentStore + 'static,
{
    debug!(slug = %slug, "Reading artwork");
    let detail = state.gallery().artwork(&slug).await?;
    found(detail, "artwork", slug)
}

/// `GET /api/exhibitions/{slug}`
pub async fn exhibition_handler<S>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> RestResult<Json<ExhibitionView>>
where
    S: DocumentStore + 'static,
{
    debug!(slug = %slug, "Reading exhibition");
    let view = state.gallery().exhibition(&slug).await?;
    found(view, "exhibition", slug)
}

/// `GET /api/performances/{slug}`
pub async fn performance_handler<S>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> RestResult<Json<EventView>>
where
    S: DocumentStore + 'static,
{
    debug!(slug = %slug, "Reading performance");
    let view = state.gallery().performance(&slug).await?;
    found(view, "performance", slug)
}
