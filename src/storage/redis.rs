use redis::AsyncCommands;
use redis::Client;

use crate::{error::AppResult, storage::KeyValueStore};

/// Creates a Redis client for favorites storage
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed key-value store
///
/// Keys are namespaced under `cinefind:` and written without a TTL. Unlike a
/// response cache, every write is awaited so the caller knows it is durable.
#[derive(Clone)]
pub struct RedisStore {
    redis_client: Client,
}

impl RedisStore {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }

    fn namespaced(key: &str) -> String {
        format!("cinefind:{}", key)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(Self::namespaced(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(Self::namespaced(key), value).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
