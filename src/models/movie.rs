use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Placeholder the OMDb API uses for any field it has no value for
pub const NOT_AVAILABLE: &str = "N/A";

/// Image shown on cards whose poster is missing
pub const FALLBACK_POSTER: &str = "/placeholder-movie.jpg";

/// Poster reference for a title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Poster {
    Url(String),
    Missing,
}

impl Poster {
    /// The poster URL, or `fallback` when the title has no image
    pub fn url_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Poster::Url(url) => url,
            Poster::Missing => fallback,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Poster::Missing)
    }
}

impl From<String> for Poster {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
            Poster::Missing
        } else {
            Poster::Url(value)
        }
    }
}

impl From<Poster> for String {
    fn from(poster: Poster) -> Self {
        match poster {
            Poster::Url(url) => url,
            Poster::Missing => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Kind of entry in the metadata catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
    Game,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
            MediaKind::Episode => "episode",
            MediaKind::Game => "game",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "movie" => Some(MediaKind::Movie),
            "series" => Some(MediaKind::Series),
            "episode" => Some(MediaKind::Episode),
            "game" => Some(MediaKind::Game),
            _ => None,
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal record for one title, as shown on a poster card and stored in favorites.
///
/// `id` is the IMDb identifier and the only key used for equality checks
/// anywhere in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    /// Release year as reported, e.g. `2010` or `2008–2013`
    pub year: String,
    pub poster: Poster,
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        poster: Poster,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster,
        }
    }
}

/// Extended metadata for a single title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: Poster,
    pub kind: Option<MediaKind>,
    /// IMDb rating; `None` when the catalog has no usable value
    pub rating: Option<f32>,
    pub genres: Vec<String>,
    pub plot: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub runtime: Option<String>,
    pub content_rating: Option<String>,
    pub released: Option<String>,
}

impl MovieDetail {
    /// The card-sized record for this title
    pub fn summary(&self) -> Movie {
        Movie {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster: self.poster.clone(),
        }
    }

    pub fn primary_genre(&self) -> Option<&str> {
        self.genres.first().map(String::as_str)
    }
}

/// `None` for blank values and the catalog's "not available" marker
pub fn available(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a string-encoded rating. The marker is rejected before any numeric
/// conversion, and non-finite results are discarded.
pub fn parse_rating(value: Option<&str>) -> Option<f32> {
    let raw = value?.trim();
    if raw.is_empty() || raw == NOT_AVAILABLE {
        return None;
    }
    raw.parse::<f32>().ok().filter(|rating| rating.is_finite())
}

/// Split a comma-separated genre list, keeping its order
pub fn parse_genres(value: Option<&str>) -> Vec<String> {
    match value.map(str::trim) {
        None | Some("") | Some(NOT_AVAILABLE) => Vec::new(),
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
