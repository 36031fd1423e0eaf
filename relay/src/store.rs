use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(#[from] redis::RedisError),
}

/// Shared dedup store. A key's presence is the only evidence that a
/// notification was already published for it.
#[async_trait]
pub trait DedupStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;
    async fn set_with_ttl(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;
}

const SENTINEL: i64 = 1;

/// Redis-backed store reachable by every relay instance.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects eagerly so a bad store address fails startup instead of the
    /// first request.
    pub async fn connect(addr: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(addr)?;
        let conn = client.get_connection_manager().await?;

        Ok(RedisStore { conn })
    }
}

#[async_trait]
impl DedupStore for RedisStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        Ok(conn.exists(key).await?)
    }

    async fn set_with_ttl(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        Ok(conn.set_ex(key, SENTINEL, ttl.as_secs()).await?)
    }
}
