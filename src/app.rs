use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::{
    config::Config,
    error::AppResult,
    models::{Movie, MovieDetail},
    services::{
        recommendations::DEFAULT_TITLE_POOL, title_search, DetailFetcher, DetailPage, DetailView,
        FavoritesReader, FavoritesStore, FavoritesWriter, MovieProvider, OmdbProvider, PageLoad,
        RecommendationAssembler,
    },
    storage::{redis::create_redis_client, FileStore, KeyValueStore, RedisStore},
    telemetry::operation_span,
};

/// Application core consumed by the presentation layer
///
/// Owns every component explicitly; nothing is reached through global state.
#[derive(Clone)]
pub struct MovieFinder {
    provider: Arc<dyn MovieProvider>,
    favorites: Arc<FavoritesStore>,
    recommendations: RecommendationAssembler,
    detail_fetcher: DetailFetcher,
    detail_page: Arc<DetailPage>,
}

impl MovieFinder {
    /// Assemble the core from already-built parts
    pub fn new(
        provider: Arc<dyn MovieProvider>,
        favorites: Arc<FavoritesStore>,
        recommendations: RecommendationAssembler,
    ) -> Self {
        let detail_fetcher = DetailFetcher::new(provider.clone());
        Self {
            provider,
            favorites,
            recommendations,
            detail_page: Arc::new(DetailPage::new(detail_fetcher.clone())),
            detail_fetcher,
        }
    }

    /// Build the core from configuration: OMDb provider, favorites storage
    /// (Redis when `REDIS_URL` is set, otherwise files) and the recommendation settings
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let provider = OmdbProvider::new(
            config.omdb_api_key.clone(),
            config.omdb_api_url.clone(),
            timeout,
        )?;

        let storage: Arc<dyn KeyValueStore> = match config.redis_url.as_deref() {
            Some(redis_url) => Arc::new(RedisStore::new(create_redis_client(redis_url)?)),
            None => Arc::new(FileStore::open(&config.favorites_dir).await?),
        };
        tracing::info!(backend = storage.name(), "Favorites storage selected");

        let favorites = FavoritesStore::load(storage, config.favorites_key.clone()).await;

        let recommendations = RecommendationAssembler::new(
            DEFAULT_TITLE_POOL,
            config.recommendation_sample_size,
            config.recommendation_limit,
        )?
        .with_fetch_timeout(timeout);

        Ok(Self::new(
            Arc::new(provider),
            Arc::new(favorites),
            recommendations,
        ))
    }

    /// Read-only handle for views that only display favorites
    pub fn favorites_reader(&self) -> Arc<dyn FavoritesReader> {
        self.favorites.clone()
    }

    /// Handle for views that toggle favorites
    pub fn favorites_writer(&self) -> Arc<dyn FavoritesWriter> {
        self.favorites.clone()
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        title_search::search_titles(self.provider.as_ref(), query)
            .instrument(operation_span("search"))
            .await
    }

    pub async fn toggle_favorite(&self, movie: Movie) -> AppResult<bool> {
        self.favorites
            .toggle_favorite(movie)
            .instrument(operation_span("toggle_favorite"))
            .await
    }

    pub async fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id).await
    }

    pub async fn list_favorites(&self) -> Vec<Movie> {
        self.favorites.list().await
    }

    /// The landing "top picks" panel
    pub async fn get_recommendations(&self) -> AppResult<Vec<MovieDetail>> {
        self.recommendations
            .assemble(self.provider.clone())
            .instrument(operation_span("get_recommendations"))
            .await
    }

    pub async fn get_detail(&self, id: &str) -> AppResult<MovieDetail> {
        self.detail_fetcher
            .fetch_detail(id)
            .instrument(operation_span("get_detail"))
            .await
    }

    /// Related titles for a detail view; failures yield an empty list
    pub async fn get_related(&self, detail: &MovieDetail) -> Vec<Movie> {
        self.detail_fetcher
            .fetch_related(detail, &detail.id)
            .instrument(operation_span("get_related"))
            .await
    }

    /// Navigate the detail view to `id`, discarding loads the user moved away from
    pub async fn open_detail(&self, id: &str) -> AppResult<PageLoad<DetailView>> {
        self.detail_page
            .open(id)
            .instrument(operation_span("open_detail"))
            .await
    }
}
