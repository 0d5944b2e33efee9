use serde::Deserialize;

pub mod movie;

pub use movie::{
    available, parse_genres, parse_rating, MediaKind, Movie, MovieDetail, Poster,
    FALLBACK_POSTER, NOT_AVAILABLE,
};

/// A title search with optional catalog filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub kind: Option<MediaKind>,
    pub year: Option<String>,
    /// Result page as numbered by the API (1-based)
    pub page: Option<u32>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            kind: None,
            year: None,
            page: None,
        }
    }

    pub fn kind(mut self, kind: MediaKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw search response from the OMDb API
///
/// A failed lookup comes back as a 200 with `Response: "False"` and an `Error` message.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

/// One entry of an OMDb search result
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

impl From<OmdbSearchItem> for Movie {
    fn from(item: OmdbSearchItem) -> Self {
        Movie {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: Poster::from(item.poster.unwrap_or_default()),
        }
    }
}

/// Raw detail response from the OMDb API (`?i=` or `?t=` lookups)
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbDetail {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    #[serde(rename = "Released", default)]
    pub released: Option<String>,
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Writer", default)]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbDetail {
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

impl From<OmdbDetail> for MovieDetail {
    fn from(detail: OmdbDetail) -> Self {
        MovieDetail {
            id: detail.imdb_id.unwrap_or_default(),
            title: detail.title.unwrap_or_default(),
            year: detail.year.unwrap_or_default(),
            poster: Poster::from(detail.poster.unwrap_or_default()),
            kind: detail.kind.as_deref().and_then(MediaKind::parse),
            rating: parse_rating(detail.imdb_rating.as_deref()),
            genres: parse_genres(detail.genre.as_deref()),
            plot: available(detail.plot),
            director: available(detail.director),
            writer: available(detail.writer),
            actors: available(detail.actors),
            runtime: available(detail.runtime),
            content_rating: available(detail.rated),
            released: available(detail.released),
        }
    }
}
