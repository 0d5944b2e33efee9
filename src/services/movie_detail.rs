use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{MediaKind, Movie, MovieDetail, SearchRequest},
    services::{latest::LatestRequest, providers::MovieProvider},
};

/// Maximum number of entries in the related panel
pub const RELATED_LIMIT: usize = 8;

/// Fetches one title's detail and the related-movies panel for it
#[derive(Clone)]
pub struct DetailFetcher {
    provider: Arc<dyn MovieProvider>,
    related_limit: usize,
}

impl DetailFetcher {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            related_limit: RELATED_LIMIT,
        }
    }

    /// Fetch extended metadata for `id`
    ///
    /// Failures are terminal for the view and never retried.
    pub async fn fetch_detail(&self, id: &str) -> AppResult<MovieDetail> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::NotFound(String::new()));
        }
        self.provider.fetch_by_id(id).await
    }

    /// Titles related to `detail`, never including `exclude_id`
    ///
    /// Any failure degrades to an empty list.
    pub async fn fetch_related(&self, detail: &MovieDetail, exclude_id: &str) -> Vec<Movie> {
        let Some(query) = related_query(detail) else {
            return Vec::new();
        };

        let request = SearchRequest::new(query.clone()).kind(MediaKind::Movie).page(1);
        match self.provider.search(&request).await {
            Ok(movies) => {
                let related = filter_related(movies, exclude_id, self.related_limit);
                tracing::debug!(
                    title_id = %detail.id,
                    query = %query,
                    related = related.len(),
                    "Related titles fetched"
                );
                related
            }
            Err(e) => {
                tracing::debug!(
                    title_id = %detail.id,
                    query = %query,
                    error = %e,
                    "Related search failed, showing none"
                );
                Vec::new()
            }
        }
    }
}

/// Query used to find related titles: the first genre, else the first word of the title
///
/// The title fallback is a weak heuristic; a generic first word yields loosely
/// related matches.
pub fn related_query(detail: &MovieDetail) -> Option<String> {
    detail
        .primary_genre()
        .or_else(|| detail.title.split_whitespace().next())
        .map(str::to_string)
}

/// Drop the excluded id and repeats, then cap the list
pub fn filter_related(movies: Vec<Movie>, exclude_id: &str, limit: usize) -> Vec<Movie> {
    let mut seen = HashSet::new();
    movies
        .into_iter()
        .filter(|movie| movie.id != exclude_id)
        .filter(|movie| seen.insert(movie.id.clone()))
        .take(limit)
        .collect()
}

/// Everything a detail view shows
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub detail: MovieDetail,
    pub related: Vec<Movie>,
}

/// Result of loading a keyed view
#[derive(Debug, Clone, PartialEq)]
pub enum PageLoad<T> {
    Ready(T),
    /// Another load was started before this one finished; its result was discarded
    Superseded,
}

impl<T> PageLoad<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            PageLoad::Ready(value) => Some(value),
            PageLoad::Superseded => None,
        }
    }
}

/// Detail view loader that ignores responses for titles the user has navigated away from
pub struct DetailPage {
    fetcher: DetailFetcher,
    active: LatestRequest<String>,
}

impl DetailPage {
    pub fn new(fetcher: DetailFetcher) -> Self {
        Self {
            fetcher,
            active: LatestRequest::new(),
        }
    }

    /// Identifier of the view currently being shown or loaded
    pub async fn active_id(&self) -> Option<String> {
        self.active.current_key().await
    }

    /// Load the detail and related panel for `id`
    ///
    /// Returns `Superseded` when another `open` was issued while this one was in
    /// flight. A detail failure is returned as the error; a related failure only
    /// empties the panel.
    pub async fn open(&self, id: &str) -> AppResult<PageLoad<DetailView>> {
        let id = id.trim();
        let ticket = self.active.issue(id.to_string()).await;

        let detail = self.fetcher.fetch_detail(id).await;
        if !self.active.is_current(&ticket).await {
            tracing::debug!(title_id = %id, "Discarding stale detail response");
            return Ok(PageLoad::Superseded);
        }
        let detail = detail?;

        let related = self.fetcher.fetch_related(&detail, &detail.id).await;
        if !self.active.is_current(&ticket).await {
            tracing::debug!(title_id = %id, "Discarding stale related response");
            return Ok(PageLoad::Superseded);
        }

        Ok(PageLoad::Ready(DetailView { detail, related }))
    }
}
