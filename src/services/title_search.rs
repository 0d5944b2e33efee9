use crate::{
    error::{AppError, AppResult},
    models::{Movie, SearchRequest},
    services::providers::MovieProvider,
};

/// Service function for title search
///
/// Blank input is rejected locally without touching the provider. Anything else
/// is a single provider call with the trimmed query.
pub async fn search_titles(provider: &dyn MovieProvider, query: &str) -> AppResult<Vec<Movie>> {
    search_with(provider, SearchRequest::new(query)).await
}

/// Title search with catalog filters (kind, year, page)
pub async fn search_with(
    provider: &dyn MovieProvider,
    mut request: SearchRequest,
) -> AppResult<Vec<Movie>> {
    let trimmed = request.query.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyQuery);
    }
    if trimmed.len() != request.query.len() {
        request.query = trimmed.to_string();
    }

    let movies = provider.search(&request).await?;
    if movies.is_empty() {
        return Err(AppError::NoResults);
    }
    Ok(movies)
}
