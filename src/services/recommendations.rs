use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::MovieDetail,
    services::providers::MovieProvider,
};

/// Titles the landing panel draws from
pub const DEFAULT_TITLE_POOL: [&str; 16] = [
    "Inception",
    "The Shawshank Redemption",
    "The Dark Knight",
    "Pulp Fiction",
    "Forrest Gump",
    "Interstellar",
    "Fight Club",
    "The Matrix",
    "Goodfellas",
    "The Godfather",
    "The Lord of the Rings: The Return of the King",
    "Gladiator",
    "Whiplash",
    "The Prestige",
    "Parasite",
    "Joker",
];

pub const DEFAULT_SAMPLE_SIZE: usize = 8;
pub const DEFAULT_LIMIT: usize = 6;
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Builds the rotating "top picks" panel
///
/// Draws a random sample from a fixed title pool, fetches every sampled title
/// concurrently, drops entries without a usable rating and keeps the best rated.
#[derive(Debug, Clone)]
pub struct RecommendationAssembler {
    pool: Vec<String>,
    sample_size: usize,
    limit: usize,
    fetch_timeout: Duration,
}

impl Default for RecommendationAssembler {
    fn default() -> Self {
        Self {
            pool: DEFAULT_TITLE_POOL.iter().map(|t| t.to_string()).collect(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            limit: DEFAULT_LIMIT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl RecommendationAssembler {
    /// Creates an assembler over `pool`
    ///
    /// Duplicate pool titles are collapsed. Requires `0 < limit <= sample_size <= pool size`.
    pub fn new<I, S>(pool: I, sample_size: usize, limit: usize) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let pool: Vec<String> = pool
            .into_iter()
            .map(Into::<String>::into)
            .filter(|title: &String| !title.trim().is_empty() && seen.insert(title.clone()))
            .collect();

        if limit == 0 || limit > sample_size || sample_size > pool.len() {
            return Err(AppError::InvalidInput(format!(
                "Recommendation settings need 0 < limit ({}) <= sample size ({}) <= pool size ({})",
                limit,
                sample_size,
                pool.len()
            )));
        }

        Ok(Self {
            pool,
            sample_size,
            limit,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        })
    }

    /// Bounds each detail fetch so one hung request cannot stall the batch
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Draw `sample_size` distinct titles from the pool
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        self.pool
            .choose_multiple(rng, self.sample_size)
            .cloned()
            .collect()
    }

    /// Assemble recommendations using the thread-local RNG
    pub async fn assemble(&self, provider: Arc<dyn MovieProvider>) -> AppResult<Vec<MovieDetail>> {
        let titles = self.sample(&mut rand::thread_rng());
        self.assemble_from(provider, titles).await
    }

    /// Fetch the given titles concurrently and rank the results
    ///
    /// Every fetch is awaited whether or not the others fail. Only a batch in
    /// which nothing came back is an error.
    pub async fn assemble_from(
        &self,
        provider: Arc<dyn MovieProvider>,
        titles: Vec<String>,
    ) -> AppResult<Vec<MovieDetail>> {
        tracing::info!(title_count = titles.len(), "Fetching recommendation batch");

        let mut tasks = Vec::with_capacity(titles.len());
        for title in titles {
            let provider = provider.clone();
            let fetch_timeout = self.fetch_timeout;
            let task = tokio::spawn(async move {
                match tokio::time::timeout(fetch_timeout, provider.fetch_by_title(&title)).await {
                    Ok(result) => result,
                    Err(_) => Err(AppError::Transport(format!(
                        "Fetching '{}' timed out after {:?}",
                        title, fetch_timeout
                    ))),
                }
            });
            tasks.push(task);
        }

        let mut results = Vec::new();
        let mut error_count = 0usize;

        for task in tasks {
            match task.await {
                Ok(Ok(detail)) => results.push(detail),
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Recommendation fetch failed for title");
                    error_count += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            tracing::warn!(
                success_count = results.len(),
                error_count,
                "Partial recommendation fetch failure"
            );
        }

        if results.is_empty() && error_count > 0 {
            return Err(AppError::RecommendationUnavailable);
        }

        let ranked = rank_by_rating(results, self.limit);
        tracing::info!(recommended = ranked.len(), "Recommendations assembled");

        Ok(ranked)
    }
}

/// Keep rated titles with an identifier, best rated first, at most `limit`
///
/// Ties keep their input order. Repeated identifiers keep the first occurrence.
pub fn rank_by_rating(details: Vec<MovieDetail>, limit: usize) -> Vec<MovieDetail> {
    let mut seen = HashSet::new();
    let mut rated: Vec<(f32, MovieDetail)> = details
        .into_iter()
        .filter(|detail| !detail.id.trim().is_empty())
        .filter_map(|detail| detail.rating.map(|rating| (rating, detail)))
        .filter(|(_, detail)| seen.insert(detail.id.clone()))
        .collect();

    rated.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    rated.truncate(limit);
    rated.into_iter().map(|(_, detail)| detail).collect()
}
