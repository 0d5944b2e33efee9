/// Durable key-value storage for user state
///
/// The favorites store keeps its whole set under a single string key. Backends
/// only need to read and overwrite one value at a time.
use crate::error::AppResult;

pub mod file;
pub mod memory;
pub mod redis;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

/// String-keyed slot storage
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was written yet
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Overwrite the value stored under `key`
    ///
    /// Returns once the value is durable.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
