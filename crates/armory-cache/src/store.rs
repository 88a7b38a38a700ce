//! # Cache Store
//!
//! The Redis connection and the operations the service layer uses.
//!
//! ## Reconnection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Connection Manager Behavior                          │
//! │                                                                         │
//! │  Command fails (connection dropped)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Retry with capped exponential backoff                                 │
//! │    delay = factor(100ms) × base^attempt, capped at 3000ms              │
//! │    up to 10 attempts                                                   │
//! │       │                                                                 │
//! │       ├── Reconnected → subsequent commands succeed                    │
//! │       └── Still down  → command returns an error; the caller's         │
//! │                         best-effort policy decides what happens        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The manager is cheap to clone (shared multiplexed connection), so the
//! store is `Clone` and handed to every service.

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CacheError, CacheResult};

// =============================================================================
// Configuration
// =============================================================================

/// Cache configuration.
///
/// Defaults implement the reconnect policy: 100ms backoff factor, 3s
/// delay ceiling, 10 attempts before a command gives up.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis connection URL.
    pub redis_url: String,

    /// Backoff multiplier in milliseconds.
    pub backoff_factor_ms: u64,

    /// Upper bound for a single backoff delay, in milliseconds.
    pub max_delay_ms: u64,

    /// Reconnect attempts before a command fails.
    pub number_of_retries: usize,
}

impl CacheConfig {
    /// Creates a cache configuration with the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        CacheConfig {
            redis_url: url.into(),
            backoff_factor_ms: 100,
            max_delay_ms: 3000,
            number_of_retries: 10,
        }
    }

    /// Sets the number of reconnect attempts.
    pub fn number_of_retries(mut self, retries: usize) -> Self {
        self.number_of_retries = retries;
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to the Redis cache.
///
/// ## Usage
/// ```rust,ignore
/// let cache = CacheStore::connect(CacheConfig::new(&url)).await?;
///
/// cache.set_json(&key, &views, keys::LIST_TTL_SECS).await?;
/// let hit: Option<Vec<GadgetView>> = cache.get_json(&key).await?;
/// ```
#[derive(Clone)]
pub struct CacheStore {
    conn: ConnectionManager,
}

impl CacheStore {
    /// Connects to Redis and returns a ready store.
    ///
    /// ## Errors
    /// Fails if the initial connection cannot be established. After a
    /// successful connect, the manager self-heals: later outages surface
    /// as per-command errors while reconnection happens in the background.
    pub async fn connect(config: CacheConfig) -> CacheResult<Self> {
        info!("Connecting to cache store");

        let client = redis::Client::open(config.redis_url.as_str())
            .map_err(|e| CacheError::ConnectionFailed(e.to_string()))?;

        let manager_config = ConnectionManagerConfig::new()
            .set_factor(config.backoff_factor_ms)
            .set_max_delay(config.max_delay_ms)
            .set_number_of_retries(config.number_of_retries);

        let conn = ConnectionManager::new_with_config(client, manager_config)
            .await
            .map_err(|e| CacheError::ConnectionFailed(e.to_string()))?;

        info!("Cache store connected");
        Ok(CacheStore { conn })
    }

    /// Reads a raw string value.
    pub async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;

        debug!(key = %key, hit = value.is_some(), "Cache get");
        Ok(value)
    }

    /// Writes a raw string value with a TTL in seconds.
    pub async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, value, ttl_secs).await?;

        debug!(key = %key, ttl_secs, "Cache set");
        Ok(())
    }

    /// Reads and deserializes a JSON value.
    ///
    /// ## Returns
    /// * `Ok(Some(T))` - Key present and payload parsed
    /// * `Ok(None)` - Key absent
    /// * `Err(..)` - Transport failure or unparseable payload
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serializes and writes a JSON value with a TTL in seconds.
    pub async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> CacheResult<()> {
        let payload = serde_json::to_string(value)?;
        self.set(key, &payload, ttl_secs).await
    }

    /// Deletes a set of keys. A no-op for an empty set.
    pub async fn delete(&self, keys: &[String]) -> CacheResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        let _: () = conn.del(keys).await?;

        debug!(count = keys.len(), "Cache delete");
        Ok(())
    }

    /// Checks if the cache is healthy (responds to PING).
    pub async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        let pong: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        pong.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CacheConfig {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        CacheConfig::new(url)
    }

    #[test]
    fn test_config_defaults_match_reconnect_policy() {
        let config = CacheConfig::new("redis://localhost");
        assert_eq!(config.backoff_factor_ms, 100);
        assert_eq!(config.max_delay_ms, 3000);
        assert_eq!(config.number_of_retries, 10);
    }

    #[tokio::test]
    #[ignore = "requires a running Redis instance (REDIS_URL)"]
    async fn test_raw_round_trip_and_delete() {
        let cache = CacheStore::connect(test_config()).await.unwrap();
        let key = format!("test_raw_{}", std::process::id());

        cache.set(&key, "483920", 60).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("483920"));

        cache.delete(&[key.clone()]).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());

        // Missing key is a miss, not an error.
        assert!(cache.get("test_never_written").await.unwrap().is_none());

        // Empty delete set is a no-op.
        cache.delete(&[]).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a running Redis instance (REDIS_URL)"]
    async fn test_json_round_trip() {
        let cache = CacheStore::connect(test_config()).await.unwrap();
        let key = format!("test_json_{}", std::process::id());

        let snapshot = vec!["The Kraken-42".to_string(), "The Ghost-7".to_string()];
        cache.set_json(&key, &snapshot, 60).await.unwrap();

        let back: Option<Vec<String>> = cache.get_json(&key).await.unwrap();
        assert_eq!(back, Some(snapshot));

        cache.delete(&[key]).await.unwrap();
    }
}
