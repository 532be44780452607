//! Redis-backed validation cache.

use super::service::{CacheError, CacheResult, ValidationCache};
use crate::domain::token_signer::TokenValidation;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Prefix for token-keyed positive validations.
const VALIDATION_PREFIX: &str = "token_validation:";

/// Prefix for username-keyed entries removed on logout.
const OWNER_PREFIX: &str = "user_tokens:";

/// Redis cache for token validation results.
///
/// Uses `ConnectionManager` for connection reuse. All operations are
/// fail-open: errors are logged and treated as misses.
pub struct RedisValidationCache {
    client: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisValidationCache {
    /// Connects to Redis, validates the connection with a PING, and
    /// configures the entry TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
        })
    }
}

#[async_trait]
impl ValidationCache for RedisValidationCache {
    async fn get(&self, token: &str) -> CacheResult<Option<TokenValidation>> {
        let key = format!("{}{}", VALIDATION_PREFIX, token);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(validation) => {
                    debug!("Validation cache HIT");
                    Ok(Some(validation))
                }
                Err(e) => {
                    warn!(error = %e, "Discarding undecodable validation cache entry");
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!("Validation cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(error = %e, "Redis GET error");
                Ok(None)
            }
        }
    }

    async fn put(&self, token: &str, validation: &TokenValidation) -> CacheResult<()> {
        let key = format!("{}{}", VALIDATION_PREFIX, token);
        let mut conn = self.client.clone();

        let raw = serde_json::to_string(validation)
            .map_err(|e| CacheError::Operation(e.to_string()))?;

        match conn.set_ex::<_, _, ()>(&key, raw, self.ttl_seconds).await {
            Ok(_) => {
                debug!(ttl = self.ttl_seconds, "Validation cache SET");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Redis SET error");
                Ok(())
            }
        }
    }

    async fn evict_owner(&self, username: &str) -> CacheResult<()> {
        let key = format!("{}{}", OWNER_PREFIX, username);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!(username, "Evicted owner cache entry");
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Redis DEL error");
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
