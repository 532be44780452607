//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Aggregated per-owner link statistics.
///
/// All aggregation happens in the store (count/sum/sort), never by loading
/// every row into the application.
#[derive(Debug, Clone)]
pub struct OwnerStats {
    pub active_count: i64,
    pub total_clicks: i64,
    pub top_links: Vec<ShortLink>,
}

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link with `click_count = 0` and `is_active = true`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds the active link with the given code.
    ///
    /// Deactivated links are invisible here regardless of expiry; expiry
    /// checking is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Checks whether any record ever used this code, active or not.
    ///
    /// Codes are never reused, so this must consult the full history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Lists an owner's active links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_owner(
        &self,
        username: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortLink>, AppError>;

    /// Counts an owner's active links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_active_for_owner(&self, username: &str) -> Result<i64, AppError>;

    /// Sums click counts across an owner's active links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn total_clicks_for_owner(&self, username: &str) -> Result<i64, AppError>;

    /// Returns an owner's active links ordered by click count descending,
    /// truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn top_by_clicks(&self, username: &str, limit: i64) -> Result<Vec<ShortLink>, AppError>;

    /// Increments the click counter for a code by exactly one.
    ///
    /// Must execute as a single atomic UPDATE expression
    /// (`click_count = click_count + 1`), never read-modify-write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_click_count(&self, code: &str) -> Result<(), AppError>;

    /// Deactivates a link (`is_active = false`). The record is never
    /// physically removed.
    ///
    /// Returns `Ok(true)` if an active link was deactivated, `Ok(false)` if
    /// none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn deactivate(&self, code: &str) -> Result<bool, AppError>;
}
