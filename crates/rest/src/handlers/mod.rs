//! HTTP request handlers.
//!
//! - [`listings`] - Collection listings that degrade instead of failing
//! - [`details`] - Detail pages looked up by slug
//! - [`inquiry`] - Acquisition inquiry submission
//! - [`health`] - Health check endpoints

pub mod details;
pub mod health;
pub mod inquiry;
pub mod listings;

pub use details::{artist_handler, artwork_handler, exhibition_handler, performance_handler};
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use inquiry::inquiry_handler;
pub use listings::{
    artists_handler, exhibitions_handler, headquarters_handler, highlights_handler,
    performances_handler, team_handler,
};
