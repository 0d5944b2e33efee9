/// Movie metadata provider abstraction
///
/// Services talk to the metadata API only through `MovieProvider`, so the
/// pipelines can be exercised without a network and the OMDb client could be
/// swapped for another catalog.
use crate::{
    error::AppResult,
    models::{Movie, MovieDetail, SearchRequest},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for movie metadata providers
///
/// Every call is a single attempt; callers own any re-triggering.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search titles by free text
    ///
    /// A search that matches nothing is reported as `AppError::NoResults`, never
    /// as an empty list.
    async fn search(&self, request: &SearchRequest) -> AppResult<Vec<Movie>>;

    /// Fetch extended metadata by IMDb identifier
    async fn fetch_by_id(&self, id: &str) -> AppResult<MovieDetail>;

    /// Fetch extended metadata by exact title
    async fn fetch_by_title(&self, title: &str) -> AppResult<MovieDetail>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
