//! Movie records as returned by the catalog, plus their display derivations.

use chrono::NaiveDate;

use crate::ids::MovieId;
use crate::image::ImageSize;

/// Sentinel shown when a date, year or runtime is not available.
pub const UNKNOWN: &str = "Unknown";

const NO_GENRES: &str = "No genres";

/// Lightweight movie record used by list views, the offline cache and favorites.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(rename = "overview", default))]
    pub synopsis: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub release_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "vote_average", default))]
    pub rating_average: f64,
}

impl MovieSummary {
    pub fn poster_url(&self) -> Option<String> {
        ImageSize::poster().url_for(self.poster_path.as_deref())
    }

    pub fn thumbnail_url(&self) -> Option<String> {
        ImageSize::thumbnail().url_for(self.poster_path.as_deref())
    }

    /// Four-digit release year, or [`UNKNOWN`] when the date is absent or too short.
    pub fn release_year(&self) -> String {
        release_year(self.release_date.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full movie record shown on the detail screen.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieDetail {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub summary: MovieSummary,
    #[cfg_attr(feature = "serde", serde(default))]
    pub backdrop_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "vote_count", default))]
    pub rating_count: u64,
    #[cfg_attr(feature = "serde", serde(rename = "runtime", default))]
    pub runtime_minutes: Option<u32>,
    // The service sends `null` for unclassified titles.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "null_as_empty")
    )]
    pub genres: Vec<Genre>,
}

impl MovieDetail {
    pub fn id(&self) -> MovieId {
        self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    /// Projection used when a detail screen toggles the favorite state.
    pub fn to_summary(&self) -> MovieSummary {
        self.summary.clone()
    }

    pub fn poster_url(&self) -> Option<String> {
        self.summary.poster_url()
    }

    pub fn backdrop_url(&self) -> Option<String> {
        ImageSize::backdrop().url_for(self.backdrop_path.as_deref())
    }

    /// `2025-03-31` renders as `March 31, 2025`. Unparseable dates are returned verbatim.
    pub fn formatted_release_date(&self) -> String {
        let Some(raw) = self.summary.release_date.as_deref() else {
            return UNKNOWN.to_string();
        };
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date.format("%B %-d, %Y").to_string(),
            Err(_) => raw.to_string(),
        }
    }

    /// `Xh Ym`, or `Ym` for runs shorter than an hour.
    pub fn formatted_runtime(&self) -> String {
        match self.runtime_minutes {
            None => UNKNOWN.to_string(),
            Some(minutes) if minutes >= 60 => {
                format!("{}h {}m", minutes / 60, minutes % 60)
            }
            Some(minutes) => format!("{minutes}m"),
        }
    }

    pub fn genres_text(&self) -> String {
        if self.genres.is_empty() {
            return NO_GENRES.to_string();
        }
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn release_year(release_date: Option<&str>) -> String {
    match release_date {
        Some(date) if date.chars().count() >= 4 => date.chars().take(4).collect(),
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(feature = "serde")]
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Genre>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Ok(Option::<Vec<Genre>>::deserialize(deserializer)?.unwrap_or_default())
}
