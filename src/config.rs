use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Upper bound for a single API request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Storage key holding the serialized favorites
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,

    /// Directory used by the file-backed favorites store
    #[serde(default = "default_favorites_dir")]
    pub favorites_dir: String,

    /// Redis connection URL. When set, favorites are kept in Redis instead of on disk.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// How many titles are drawn from the pool for each recommendation panel
    #[serde(default = "default_recommendation_sample_size")]
    pub recommendation_sample_size: usize,

    /// How many recommendations are shown
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_favorites_key() -> String {
    "favorites".to_string()
}

fn default_favorites_dir() -> String {
    ".cinefind".to_string()
}

fn default_recommendation_sample_size() -> usize {
    8
}

fn default_recommendation_limit() -> usize {
    6
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Build a configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
