//! Repository trait for refresh token storage.

use crate::domain::entities::{NewRefreshToken, RefreshToken};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for refresh tokens.
///
/// The schema enforces at most one row per owner (`UNIQUE (user_id)`);
/// [`RefreshTokenRepository::replace_for_user`] is the only insert path and
/// rotates atomically.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRefreshTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Replaces the owner's refresh token with a new one.
    ///
    /// Deletes every existing row for `new_token.user_id` and inserts the new
    /// row inside one transaction; the deletion is visible to the insert
    /// before it executes. Under concurrent rotation for the same owner, the
    /// last committed writer wins and exactly one row survives.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn replace_for_user(&self, new_token: NewRefreshToken) -> Result<RefreshToken, AppError>;

    /// Exact-match token lookup. No side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError>;

    /// Deletes the row holding this token value, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_token(&self, token: &str) -> Result<(), AppError>;

    /// Deletes all tokens for an owner. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_for_user(&self, user_id: i64) -> Result<u64, AppError>;
}
