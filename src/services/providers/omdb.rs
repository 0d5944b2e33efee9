/// OMDb API provider
///
/// API Flow:
/// 1. Title Search: `/?s=<query>` → list of summary records, or `Response: "False"`
/// 2. Detail: `/?i=<imdb_id>` or `/?t=<title>` → one full record
///
/// OMDb answers "not found" with a 200 status and an `Error` message, so the
/// `Response` flag decides between data and a domain error.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieDetail, OmdbDetail, OmdbSearchResponse, SearchRequest},
    services::providers::MovieProvider,
};

const PROVIDER_NAME: &str = "omdb";

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    /// Creates a new OMDb provider whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "OMDb API key cannot be empty".to_string(),
            ));
        }

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_params<'a>(&'a self, request: &'a SearchRequest, page: &'a str) -> Vec<(&'a str, &'a str)> {
        let mut params = vec![
            ("apikey", self.api_key.as_str()),
            ("s", request.query.as_str()),
        ];
        if let Some(kind) = request.kind {
            params.push(("type", kind.as_str()));
        }
        if let Some(year) = request.year.as_deref() {
            params.push(("y", year));
        }
        if request.page.is_some() {
            params.push(("page", page));
        }
        params
    }

    /// Sends a GET with the given query parameters and returns the body text
    async fn get(&self, params: &[(&str, &str)]) -> AppResult<String> {
        let url = format!("{}/", self.api_url);

        let response = self.http_client.get(&url).query(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Transport(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        tracing::debug!(response = %body, "Raw OMDb API response");
        Ok(body)
    }

    fn parse_search(body: &str) -> AppResult<Vec<Movie>> {
        let response: OmdbSearchResponse = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize OMDb search response");
            AppError::Transport(format!("Failed to parse OMDb response: {}", e))
        })?;

        if !response.is_success() {
            tracing::debug!(
                error = response.error.as_deref().unwrap_or_default(),
                "OMDb search returned no match"
            );
            return Err(AppError::NoResults);
        }

        let movies: Vec<Movie> = response.search.into_iter().map(Movie::from).collect();
        if movies.is_empty() {
            return Err(AppError::NoResults);
        }
        Ok(movies)
    }

    fn parse_detail(body: &str, requested: &str) -> AppResult<MovieDetail> {
        let detail: OmdbDetail = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize OMDb detail response");
            AppError::Transport(format!("Failed to parse OMDb response: {}", e))
        })?;

        if !detail.is_success() {
            tracing::debug!(
                requested = %requested,
                error = detail.error.as_deref().unwrap_or_default(),
                "OMDb detail lookup returned no match"
            );
            return Err(AppError::NotFound(requested.to_string()));
        }

        Ok(MovieDetail::from(detail))
    }
}

#[async_trait::async_trait]
impl MovieProvider for OmdbProvider {
    async fn search(&self, request: &SearchRequest) -> AppResult<Vec<Movie>> {
        let page = request.page.unwrap_or(1).to_string();
        let params = self.search_params(request, &page);
        let body = self.get(&params).await?;
        let movies = Self::parse_search(&body)?;

        tracing::info!(
            query = %request.query,
            results = movies.len(),
            provider = PROVIDER_NAME,
            "Title search completed"
        );

        Ok(movies)
    }

    async fn fetch_by_id(&self, id: &str) -> AppResult<MovieDetail> {
        let body = self
            .get(&[("apikey", self.api_key.as_str()), ("i", id), ("plot", "full")])
            .await?;
        let detail = Self::parse_detail(&body, id)?;

        tracing::info!(
            title_id = %id,
            provider = PROVIDER_NAME,
            "Detail fetched"
        );

        Ok(detail)
    }

    async fn fetch_by_title(&self, title: &str) -> AppResult<MovieDetail> {
        let body = self
            .get(&[("apikey", self.api_key.as_str()), ("t", title)])
            .await?;
        let detail = Self::parse_detail(&body, title)?;

        tracing::info!(
            title = %title,
            title_id = %detail.id,
            provider = PROVIDER_NAME,
            "Detail fetched by title"
        );

        Ok(detail)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
