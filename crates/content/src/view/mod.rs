//! View model building.
//!
//! [`policy`] holds the filter, sort and fallback rules; [`models`] the
//! shapes handed to the presentation layer; [`gallery`] composes fetching,
//! resolution and policy into listings and detail pages.

pub mod gallery;
pub mod models;
pub mod policy;

pub use gallery::{Gallery, Predicate, Source};
pub use models::{
    ArtistDetail, ArtistSummary, ArtworkDetail, ArtworkView, EventDate, EventView,
    ExhibitionView, HeadquartersView, Listing, TeamMemberView,
};
