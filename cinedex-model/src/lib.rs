//! Core data model definitions shared across cinedex crates.
//!
//! Field names follow the catalog's semantic vocabulary (`synopsis`,
//! `rating_average`, ...). With the `serde` feature enabled the types
//! deserialize directly from the remote service's snake_case payloads and
//! serialize back to the same shape for local persistence.
#![allow(missing_docs)]

pub mod ids;
pub mod image;
pub mod movie;
pub mod page;

pub use ids::MovieId;
pub use image::{BackdropSize, ImageSize, PosterSize, TMDB_IMAGE_BASE};
pub use movie::{Genre, MovieDetail, MovieSummary, UNKNOWN};
pub use page::CatalogPage;
