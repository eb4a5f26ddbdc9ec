use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

type SharedConnection = Arc<Mutex<ConnectionManager>>;

/// Two-tier cache for backend reads
///
/// Tier one is an in-process `moka` cache holding JSON text. Tier two is an
/// optional Redis instance shared by every replica of the service; without a
/// Redis URL the cache is purely local.
pub struct CacheManager {
    local: moka::future::Cache<String, Arc<str>>,
    shared: Option<SharedConnection>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Connect to Redis when `redis_url` is given
    pub async fn new(redis_url: Option<&str>, capacity: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let shared = match redis_url {
            Some(url) => {
                let connection = ConnectionManager::new(redis::Client::open(url)?).await?;
                Some(Arc::new(Mutex::new(connection)))
            }
            None => None,
        };

        Ok(Self {
            local: local_tier(capacity, ttl_secs),
            shared,
            ttl_secs,
        })
    }

    pub fn in_memory(capacity: u64, ttl_secs: u64) -> Self {
        Self {
            local: local_tier(capacity, ttl_secs),
            shared: None,
            ttl_secs,
        }
    }

    pub fn has_redis(&self) -> bool {
        self.shared.is_some()
    }

    /// Look `key` up locally, then in Redis; `Ok(None)` on a miss
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        if let Some(json) = self.local.get(key).await {
            return Ok(Some(serde_json::from_str(&json)?));
        }

        let Some(shared) = &self.shared else {
            return Ok(None);
        };

        match redis_get(shared, key).await? {
            Some(json) => {
                let value = serde_json::from_str(&json)?;
                // Warm the local tier for the next reader
                self.local.insert(key.to_string(), Arc::from(json)).await;
                tracing::trace!("Redis hit for {}", key);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Store `value` in both tiers with the configured TTL
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;

        if let Some(shared) = &self.shared {
            redis_set(shared, key, &json, self.ttl_secs).await?;
        }
        self.local.insert(key.to_string(), Arc::from(json)).await;

        Ok(())
    }

    /// Drop `key` from both tiers
    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.local.invalidate(key).await;
        if let Some(shared) = &self.shared {
            redis_del(shared, key).await?;
        }

        tracing::debug!("Invalidated cache entry {}", key);
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            local_entries: self.local.entry_count(),
            redis_enabled: self.has_redis(),
            ttl_secs: self.ttl_secs,
        }
    }
}

fn local_tier(capacity: u64, ttl_secs: u64) -> moka::future::Cache<String, Arc<str>> {
    moka::future::Cache::builder()
        .max_capacity(capacity)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

async fn redis_get(shared: &SharedConnection, key: &str) -> Result<Option<String>, CacheError> {
    let mut conn = shared.lock().await;
    Ok(redis::cmd("GET").arg(key).query_async(&mut *conn).await?)
}

async fn redis_set(shared: &SharedConnection, key: &str, json: &str, ttl_secs: u64) -> Result<(), CacheError> {
    let mut conn = shared.lock().await;
    redis::cmd("SETEX")
        .arg(key)
        .arg(ttl_secs)
        .arg(json)
        .query_async::<()>(&mut *conn)
        .await?;
    Ok(())
}

async fn redis_del(shared: &SharedConnection, key: &str) -> Result<(), CacheError> {
    let mut conn = shared.lock().await;
    redis::cmd("DEL").arg(key).query_async::<()>(&mut *conn).await?;
    Ok(())
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub local_entries: u64,
    pub redis_enabled: bool,
    pub ttl_secs: u64,
}

/// Cache keys used by the service
pub struct CacheKey;

impl CacheKey {
    /// The equipment catalogue as last fetched from the backend
    pub fn catalogue() -> String {
        "equipment:catalogue".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_put_get_invalidate() {
        let cache = CacheManager::in_memory(100, 60);

        cache.put("categories", &vec!["tractor", "plough"]).await.unwrap();
        let hit: Option<Vec<String>> = cache.get("categories").await.unwrap();
        assert_eq!(hit, Some(vec!["tractor".to_string(), "plough".to_string()]));

        cache.invalidate("categories").await.unwrap();
        assert!(cache.get::<Vec<String>>("categories").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_miss_is_none() {
        let cache = CacheManager::new(None, 10, 60).await.unwrap();
        assert!(!cache.has_redis());
        assert!(cache.get::<String>("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_type_mismatch_is_an_error() {
        let cache = CacheManager::in_memory(10, 60);
        cache.put("rate", &"not a number").await.unwrap();

        assert!(matches!(
            cache.get::<f64>("rate").await,
            Err(CacheError::Serialization(_))
        ));
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_redis_round_trip() {
        let cache = CacheManager::new(Some("redis://127.0.0.1:6379"), 100, 60)
            .await
            .expect("Failed to connect to Redis");
        assert!(cache.stats().redis_enabled);

        cache.put("redis_key", &42u32).await.unwrap();
        assert_eq!(cache.get::<u32>("redis_key").await.unwrap(), Some(42));

        cache.invalidate("redis_key").await.unwrap();
        assert_eq!(cache.get::<u32>("redis_key").await.unwrap(), None);
    }
}
