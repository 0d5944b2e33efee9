/// Application-level errors
///
/// Every externally-facing operation returns one of these instead of panicking,
/// so the presentation layer can render a message for each kind.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Please enter a title to search")]
    EmptyQuery,

    #[error("No movies matched the search")]
    NoResults,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Recommendations are unavailable right now")]
    RecommendationUnavailable,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Whether the error is an expected outcome shown to the user as a plain
    /// message rather than a fault.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::EmptyQuery
                | AppError::NoResults
                | AppError::RecommendationUnavailable
                | AppError::NotFound(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Transport(format!("request timed out: {}", err))
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
