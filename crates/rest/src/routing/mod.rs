//! Route configuration for the gallery API.

pub mod gallery_routes;

pub use gallery_routes::create_routes;
