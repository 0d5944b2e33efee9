use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    storage::KeyValueStore,
};

/// Read access to the favorites set
#[async_trait::async_trait]
pub trait FavoritesReader: Send + Sync {
    /// Favorites in the order they were added
    async fn list(&self) -> Vec<Movie>;

    async fn is_favorite(&self, id: &str) -> bool;
}

/// Write access to the favorites set
#[async_trait::async_trait]
pub trait FavoritesWriter: Send + Sync {
    /// Removes the record if a favorite with the same id exists, appends it otherwise.
    ///
    /// Returns whether the title is a favorite afterwards. The full set is
    /// persisted before this returns.
    async fn toggle_favorite(&self, movie: Movie) -> AppResult<bool>;
}

/// The user's favorites, mirrored to a key-value slot
///
/// The set is read once when the store is loaded and written back in full on
/// every toggle.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    movies: RwLock<Vec<Movie>>,
}

impl FavoritesStore {
    /// Loads the favorites stored under `key`
    ///
    /// Missing, unreadable or corrupt state starts an empty set; it never fails.
    pub async fn load(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();

        let mut movies = match storage.get(&key).await {
            Ok(Some(blob)) => decode(&blob).unwrap_or_else(|e| {
                tracing::warn!(
                    key = %key,
                    backend = storage.name(),
                    error = %e,
                    "Stored favorites are corrupt, starting with an empty set"
                );
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    backend = storage.name(),
                    error = %e,
                    "Could not read stored favorites, starting with an empty set"
                );
                Vec::new()
            }
        };

        let stored = movies.len();
        let mut seen = HashSet::new();
        movies.retain(|m| seen.insert(m.id.clone()));
        if movies.len() < stored {
            tracing::warn!(
                key = %key,
                dropped = stored - movies.len(),
                "Stored favorites repeat an id, keeping the first occurrence"
            );
        }

        tracing::info!(
            key = %key,
            backend = storage.name(),
            favorites = movies.len(),
            "Favorites loaded"
        );

        Self {
            storage,
            key,
            movies: RwLock::new(movies),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait::async_trait]
impl FavoritesReader for FavoritesStore {
    async fn list(&self) -> Vec<Movie> {
        self.movies.read().await.clone()
    }

    async fn is_favorite(&self, id: &str) -> bool {
        self.movies.read().await.iter().any(|m| m.id == id)
    }
}

#[async_trait::async_trait]
impl FavoritesWriter for FavoritesStore {
    async fn toggle_favorite(&self, movie: Movie) -> AppResult<bool> {
        let mut movies = self.movies.write().await;
        let previous = movies.clone();

        let now_favorite = match movies.iter().position(|m| m.id == movie.id) {
            Some(index) => {
                movies.remove(index);
                false
            }
            None => {
                movies.push(movie);
                true
            }
        };

        let persisted = match encode(&movies) {
            Ok(blob) => self.storage.set(&self.key, &blob).await,
            Err(e) => Err(e),
        };

        if let Err(e) = persisted {
            tracing::error!(key = %self.key, error = %e, "Failed to persist favorites");
            *movies = previous;
            return Err(e);
        }

        tracing::debug!(
            key = %self.key,
            favorites = movies.len(),
            now_favorite,
            "Favorites persisted"
        );

        Ok(now_favorite)
    }
}

/// Serialize a favorites set into its stored form
pub fn encode(movies: &[Movie]) -> AppResult<String> {
    serde_json::to_string(movies)
        .map_err(|e| AppError::Storage(format!("Favorites serialization error: {}", e)))
}

/// Parse the stored form of a favorites set
pub fn decode(blob: &str) -> AppResult<Vec<Movie>> {
    serde_json::from_str(blob)
        .map_err(|e| AppError::Storage(format!("Favorites deserialization error: {}", e)))
}
