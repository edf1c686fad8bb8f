//! Poster, thumbnail and backdrop URL derivation.
//!
//! Media URLs are the concatenation of a base path, a size segment and the
//! path fragment returned by the catalog (`/abc123.jpg`). An absent fragment
//! never produces a URL; callers render a placeholder instead.

use std::fmt::{self, Display, Formatter};

/// Base path of the catalog's image CDN.
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Poster size segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PosterSize {
    W200,
    #[default]
    W500,
    Original,
}

impl PosterSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterSize::W200 => "w200",
            PosterSize::W500 => "w500",
            PosterSize::Original => "original",
        }
    }
}

/// Backdrop size segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackdropSize {
    W1280,
    #[default]
    Original,
}

impl BackdropSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackdropSize::W1280 => "w1280",
            BackdropSize::Original => "original",
        }
    }
}

/// Image size variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    Thumbnail(PosterSize), // Small poster for list rows
    Poster(PosterSize),    // Standard poster size
    Backdrop(BackdropSize), // Wide backdrop/banner
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ImageSize::Thumbnail(s) => write!(f, "Thumbnail (size: {})", s.as_str()),
            ImageSize::Poster(s) => write!(f, "Poster (size: {})", s.as_str()),
            ImageSize::Backdrop(s) => write!(f, "Backdrop (size: {})", s.as_str()),
        }
    }
}

impl ImageSize {
    /// Default thumbnail size (200px poster)
    pub const fn thumbnail() -> Self {
        Self::Thumbnail(PosterSize::W200)
    }

    /// Default poster size (500px)
    pub const fn poster() -> Self {
        Self::Poster(PosterSize::W500)
    }

    /// Default backdrop size (original upload)
    pub const fn backdrop() -> Self {
        Self::Backdrop(BackdropSize::Original)
    }

    /// Path segment inserted between the base and the fragment.
    pub fn segment(&self) -> &'static str {
        match self {
            ImageSize::Thumbnail(s) | ImageSize::Poster(s) => s.as_str(),
            ImageSize::Backdrop(s) => s.as_str(),
        }
    }

    /// Build the URL for `fragment` against [`TMDB_IMAGE_BASE`].
    pub fn url_for(&self, fragment: Option<&str>) -> Option<String> {
        self.url_with_base(TMDB_IMAGE_BASE, fragment)
    }

    /// Build the URL for `fragment` against an arbitrary base path.
    pub fn url_with_base(&self, base: &str, fragment: Option<&str>) -> Option<String> {
        let fragment = fragment.filter(|f| !f.is_empty())?;
        let base = base.trim_end_matches('/');
        if fragment.starts_with('/') {
            Some(format!("{base}/{}{fragment}", self.segment()))
        } else {
            Some(format!("{base}/{}/{fragment}", self.segment()))
        }
    }
}
