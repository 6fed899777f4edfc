//! Listing endpoint handlers.
//!
//! Listings never fail: a store error yields an empty `items` array and a
//! human-readable `error`, with status 200.

use axum::{Json, extract::State};
use gallery_content::Listing;
use gallery_content::view::models::{ArtistSummary, EventView, ExhibitionView, HeadquartersView, TeamMemberView};
use gallery_persistence::DocumentStore;
use tracing::debug;

use crate::state::AppState;

/// `GET /api/artists`
pub async fn artists_handler<S>(State(state): State<AppState<S>>) -> Json<Listing<ArtistSummary>>
where
    S: DocumentStore + 'static,
{
    debug!("Listing artists");
    Json(state.gallery().artists().await)
}

/// `GET /api/exhibitions`
pub async fn exhibitions_handler<S>(
    State(state): State<AppState<S>>,
) -> Json<Listing<ExhibitionView>>
where
    S: DocumentStore + 'static,
{
    debug!("Listing exhibitions");
    Json(state.gallery().exhibitions().await)
}

/// `GET /api/headquarters`
pub async fn headquarters_handler<S>(
    State(state): State<AppState<S>>,
) -> Json<Listing<HeadquartersView>>
where
    S: DocumentStore + 'static,
{
    debug!("Listing headquarters");
    Json(state.gallery().headquarters().await)
}

/// `GET /api/highlights`
pub async fn highlights_handler<S>(State(state): State<AppState<S>>) -> Json<Listing<EventView>>
where
    S: DocumentStore + 'static,
{
    debug!("Listing highlights");
    Json(state.gallery().highlights().await)
}

/// `GET /api/performances`
pub async fn performances_handler<S>(State(state): State<AppState<S>>) -> Json<Listing<EventView>>
where
    S: DocumentStore + 'static,
{
    debug!("Listing performances");
    Json(state.gallery().performances().await)
}

/// `GET /api/team`
pub async fn team_handler<S>(State(state): State<AppState<S>>) -> Json<Listing<TeamMemberView>>
where
    S: DocumentStore + 'static,
{
    debug!("Listing team");
    Json(state.gallery().team().await)
}
