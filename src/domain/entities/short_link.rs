//! Short link entity mapping an opaque code to an original URL.

use chrono::{DateTime, Utc};

/// A shortened URL record.
///
/// `short_code` is globally unique across all records ever created, including
/// deactivated ones; codes are never reused. `is_active = false` is a logical
/// delete and blocks redirect resolution independently of `expires_at`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: i64,
    pub is_active: bool,
}

impl ShortLink {
    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// Input data for creating a new short link.
///
/// `click_count` starts at 0 and `is_active` at true; both are owned by the
/// store, not the caller.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}
