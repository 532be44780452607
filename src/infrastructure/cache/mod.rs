//! Caching layer for access-token validation.
//!
//! Provides a [`ValidationCache`] trait with three implementations:
//! - [`RedisValidationCache`] - Redis-backed cache
//! - [`MemoryValidationCache`] - In-process `moka` cache
//! - [`NullCache`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryValidationCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisValidationCache;
pub use service::{CacheError, CacheResult, ValidationCache};
