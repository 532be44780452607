//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, ValidationCache};
use crate::domain::token_signer::TokenValidation;
use async_trait::async_trait;

/// A validation cache that stores nothing.
///
/// Every lookup misses, so the underlying verification runs on each call.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ValidationCache for NullCache {
    async fn get(&self, _token: &str) -> CacheResult<Option<TokenValidation>> {
        Ok(None)
    }

    async fn put(&self, _token: &str, _validation: &TokenValidation) -> CacheResult<()> {
        Ok(())
    }

    async fn evict_owner(&self, _username: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
