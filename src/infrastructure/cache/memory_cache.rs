//! In-process validation cache backed by `moka`.

use super::service::{CacheResult, ValidationCache};
use crate::domain::token_signer::TokenValidation;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

/// Prefix for token-keyed positive validations.
const VALIDATION_PREFIX: &str = "token_validation:";

/// Prefix for username-keyed entries removed on logout.
const OWNER_PREFIX: &str = "user_tokens:";

const MAX_ENTRIES: u64 = 10_000;

/// In-memory TTL cache for token validation results.
///
/// Used when Redis is not configured. Keys share one keyspace with the same
/// namespace prefixes as the Redis implementation, so eviction behaves
/// identically across backends.
pub struct MemoryValidationCache {
    entries: Cache<String, TokenValidation>,
}

impl MemoryValidationCache {
    /// Creates a cache whose entries expire `ttl_seconds` after insertion.
    pub fn new(ttl_seconds: u64) -> Self {
        debug!(ttl = ttl_seconds, "Using in-memory validation cache");

        Self {
            entries: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build(),
        }
    }
}

#[async_trait]
impl ValidationCache for MemoryValidationCache {
    async fn get(&self, token: &str) -> CacheResult<Option<TokenValidation>> {
        let key = format!("{}{}", VALIDATION_PREFIX, token);
        Ok(self.entries.get(&key).await)
    }

    async fn put(&self, token: &str, validation: &TokenValidation) -> CacheResult<()> {
        let key = format!("{}{}", VALIDATION_PREFIX, token);
        self.entries.insert(key, validation.clone()).await;
        Ok(())
    }

    async fn evict_owner(&self, username: &str) -> CacheResult<()> {
        let key = format!("{}{}", OWNER_PREFIX, username);
        self.entries.invalidate(&key).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
