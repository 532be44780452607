//! Validation cache trait and error types.

use async_trait::async_trait;

use crate::domain::token_signer::TokenValidation;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache for access-token validation results.
///
/// Only positive validations are stored, keyed by the raw token string under
/// the `token_validation` namespace, with a fixed TTL independent of the
/// token's own remaining lifetime. Negative results are never cached, so a
/// rejected token is re-checked on every call.
///
/// [`ValidationCache::evict_owner`] operates on the separate, username-keyed
/// `user_tokens` namespace. Token-keyed positives are untouched by eviction
/// and age out via TTL, so a validation cached as positive can be served for
/// up to the TTL after the owner logs out.
///
/// Implementations are fail-open: errors degrade to a miss and must not
/// disrupt the authentication path.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisValidationCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::MemoryValidationCache`] - In-process cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation
#[async_trait]
pub trait ValidationCache: Send + Sync {
    /// Retrieves a cached validation for a token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(validation))` on cache hit
    /// - `Ok(None)` on miss or error (fail-open behavior)
    async fn get(&self, token: &str) -> CacheResult<Option<TokenValidation>>;

    /// Stores a validation result for a token.
    ///
    /// Callers only pass positive results; implementations apply the
    /// configured TTL.
    ///
    /// # Errors
    ///
    /// Should not propagate errors in production implementations; failures
    /// are logged and swallowed so the request flow is not disrupted.
    async fn put(&self, token: &str, validation: &TokenValidation) -> CacheResult<()>;

    /// Removes the entry for an owner from the `user_tokens` namespace.
    ///
    /// Invoked on logout.
    async fn evict_owner(&self, username: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
