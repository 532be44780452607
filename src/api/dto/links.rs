//! DTOs for short link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortLink;

/// Request to shorten a URL.
///
/// URL scheme/absoluteness rules are enforced by the link service so that
/// every caller goes through the same check.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    #[validate(length(min = 1, message = "URL cannot be empty"))]
    pub url: String,

    /// Optional custom short code, used verbatim after trimming.
    pub custom_alias: Option<String>,

    /// Optional expiry timestamp; defaults to one year after creation.
    pub expires_at: Option<DateTime<Utc>>,
}

/// JSON representation of a short link.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: i64,
    pub is_active: bool,
}

impl UrlResponse {
    /// Builds the response for a link, attaching the externally-facing URL.
    pub fn from_link(link: ShortLink, short_url: String) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            short_url,
            username: link.username,
            created_at: link.created_at,
            expires_at: link.expires_at,
            click_count: link.click_count,
            is_active: link.is_active,
        }
    }
}

/// One page of an owner's links.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub items: Vec<UrlResponse>,
    pub page: u32,
    pub size: u32,
}

/// Aggregated statistics for an owner.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_urls: i64,
    pub total_clicks: i64,
    pub active_urls: i64,
    pub top_urls: Vec<UrlResponse>,
}
