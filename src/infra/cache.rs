//! Redis cache implementation.
//!
//! Provides generic caching, rate-limit counters and the revoked-token
//! denylist used to invalidate bearer tokens on logout.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{
    Config, CACHE_PREFIX_RATE_LIMIT, CACHE_PREFIX_REVOKED_TOKEN, DEFAULT_CACHE_TTL_SECONDS,
};
use crate::errors::{AppError, AppResult};

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    default_ttl: u64,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    ///
    /// # Panics
    /// Panics if Redis connection fails.
    pub async fn connect(config: &Config) -> Self {
        let client =
            Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        }
    }

    /// Try to connect to Redis, returning an error instead of panicking.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        })
    }

    /// Get the connection manager for direct Redis operations.
    pub fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    /// Get a value from cache.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json).map_err(|e| {
                    AppError::internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with default TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Set a value in cache with custom TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Delete a value from cache.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }

    /// Increment a counter value.
    pub async fn incr(&self, key: &str) -> AppResult<i64> {
        let mut conn = self.connection.clone();
        let value: i64 = conn.incr(key, 1).await.map_err(cache_error)?;
        Ok(value)
    }

    // =========================================================================
    // Token Revocation
    // =========================================================================

    /// Add a token's `jti` to the denylist. The entry only needs to live as
    /// long as the token itself would.
    pub async fn revoke_token(&self, jti: &str, ttl_seconds: u64) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_REVOKED_TOKEN, jti);
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, 1i64, ttl_seconds)
            .await
            .map_err(cache_error)?;
        Ok(())
    }

    /// Check whether a token's `jti` has been revoked.
    pub async fn is_token_revoked(&self, jti: &str) -> AppResult<bool> {
        let key = format!("{}{}", CACHE_PREFIX_REVOKED_TOKEN, jti);
        self.exists(&key).await
    }

    // =========================================================================
    // Rate Limiting Operations
    // =========================================================================

    /// Check and increment rate limit counter.
    /// Returns (current_count, is_allowed) tuple.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let exists: bool = conn.exists(&key).await.map_err(cache_error)?;

        if !exists {
            // First request in window
            let _: () = conn
                .set_ex(&key, 1i64, window_seconds)
                .await
                .map_err(cache_error)?;
            return Ok((1, true));
        }

        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;
        let count = count as u64;
        let allowed = count <= max_requests;

        Ok((count, allowed))
    }

    /// Get remaining requests in rate limit window.
    pub async fn get_rate_limit_remaining(
        &self,
        identifier: &str,
        max_requests: u64,
    ) -> AppResult<u64> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let count: Option<i64> = conn.get(&key).await.map_err(cache_error)?;
        let count = count.unwrap_or(0) as u64;

        Ok(max_requests.saturating_sub(count))
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::Cache(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_prefixes() {
        assert_eq!(CACHE_PREFIX_RATE_LIMIT, "rate_limit:");
        assert_eq!(CACHE_PREFIX_REVOKED_TOKEN, "revoked:");
    }
}
