//! Short link creation, resolution, and management service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, OwnerStats};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_url;

/// Number of links returned by the per-owner top list.
const TOP_LINKS_LIMIT: i64 = 5;

/// Service for creating, resolving, and managing short links.
///
/// Generated codes are checked for global uniqueness against every record
/// ever created; codes are never reused, even after deactivation.
pub struct LinkService<L: LinkRepository> {
    repository: Arc<L>,
    click_sender: mpsc::Sender<ClickEvent>,
    code_length: usize,
    default_ttl: Duration,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `repository` - link repository for DB operations
    /// - `click_sender` - channel feeding the background click worker
    /// - `code_length` - length of generated short codes
    /// - `default_ttl_days` - link lifetime applied when the caller gives none
    pub fn new(
        repository: Arc<L>,
        click_sender: mpsc::Sender<ClickEvent>,
        code_length: usize,
        default_ttl_days: i64,
    ) -> Self {
        Self {
            repository,
            click_sender,
            code_length,
            default_ttl: Duration::days(default_ttl_days),
        }
    }

    /// Creates a short link owned by `username`.
    ///
    /// A custom alias is used verbatim (after trimming) when it has never
    /// been used by any record, active or not. Without an alias, codes are
    /// generated until a free one is found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not absolute http(s).
    /// Returns [`AppError::Conflict`] if the custom alias is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_link(
        &self,
        original_url: String,
        username: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortLink, AppError> {
        validate_url(&original_url)?;

        let alias = custom_alias
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let short_code = match alias {
            Some(alias) => {
                if self.repository.exists_by_code(&alias).await? {
                    return Err(AppError::conflict(
                        "Custom alias already exists",
                        json!({ "alias": alias }),
                    ));
                }
                alias
            }
            None => self.generate_unique_code().await?,
        };

        let expires_at = expires_at.unwrap_or_else(|| Utc::now() + self.default_ttl);

        let link = self
            .repository
            .create(NewShortLink {
                original_url,
                short_code,
                username,
                expires_at,
            })
            .await?;

        debug!(code = %link.short_code, "Short link created");

        Ok(link)
    }

    /// Resolves a short code to its original URL.
    ///
    /// On success, a click event is enqueued for the background worker; the
    /// counter write never blocks or fails the resolution. A full or closed
    /// queue is logged and the click dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link has this code.
    /// Returns [`AppError::Expired`] if the link exists but is past its
    /// expiry, surfaced distinctly so the redirect path can answer 410.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .find_active_by_code(code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "code": code }))
            })?;

        if link.is_expired() {
            return Err(AppError::expired(
                "Short URL has expired",
                json!({ "code": code }),
            ));
        }

        if let Err(e) = self.click_sender.try_send(ClickEvent::new(code)) {
            warn!(code, error = %e, "Failed to enqueue click event");
        }

        Ok(link.original_url)
    }

    /// Lists an owner's active links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_for_owner(
        &self,
        username: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortLink>, AppError> {
        self.repository.list_for_owner(username, offset, limit).await
    }

    /// Aggregated statistics for an owner: active link count, total clicks,
    /// and the top five links by click count.
    ///
    /// All aggregation happens store-side.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn stats_for_owner(&self, username: &str) -> Result<OwnerStats, AppError> {
        let active_count = self.repository.count_active_for_owner(username).await?;
        let total_clicks = self.repository.total_clicks_for_owner(username).await?;
        let top_links = self
            .repository
            .top_by_clicks(username, TOP_LINKS_LIMIT)
            .await?;

        Ok(OwnerStats {
            active_count,
            total_clicks,
            top_links,
        })
    }

    /// Soft-deletes a link after checking ownership.
    ///
    /// This is the only mutation path for the active flag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link has this code.
    /// Returns [`AppError::Unauthorized`] if the link belongs to another owner.
    pub async fn delete_link(&self, code: &str, username: &str) -> Result<(), AppError> {
        let link = self
            .repository
            .find_active_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))?;

        if link.username != username {
            return Err(AppError::unauthorized(
                "Unauthorized to delete this URL",
                json!({ "code": code }),
            ));
        }

        self.repository.deactivate(code).await?;

        debug!(code, "Short link deactivated");

        Ok(())
    }

    /// Constructs the externally-facing short URL for a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Generates a code that no record has ever used.
    ///
    /// The retry loop is bounded by collision probability (~1/62^length per
    /// attempt), not by a fixed attempt count.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        loop {
            let code = generate_code(self.code_length);

            if !self.repository.exists_by_code(&code).await? {
                return Ok(code);
            }

            debug!(code, "Generated code collided, retrying");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    fn test_link(code: &str, url: &str, username: &str) -> ShortLink {
        ShortLink {
            id: 1,
            original_url: url.to_string(),
            short_code: code.to_string(),
            username: username.to_string(),
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::days(365),
            click_count: 0,
            is_active: true,
        }
    }

    fn service(
        mock_repo: MockLinkRepository,
    ) -> (
        LinkService<MockLinkRepository>,
        mpsc::Receiver<ClickEvent>,
    ) {
        let (tx, rx) = mpsc::channel(16);
        (LinkService::new(Arc::new(mock_repo), tx, 6, 365), rx)
    }

    #[tokio::test]
    async fn test_create_link_generates_six_char_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists_by_code()
            .withf(|code| code.len() == 6 && code.chars().all(|c| c.is_ascii_alphanumeric()))
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.short_code.len() == 6)
            .times(1)
            .returning(|new_link| Ok(test_link(&new_link.short_code, &new_link.original_url, "alice")));

        let (service, _rx) = service(mock_repo);

        let result = service
            .create_link(
                "https://example.com".to_string(),
                "alice".to_string(),
                None,
                None,
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().short_code.len(), 6);
    }

    #[tokio::test]
    async fn test_create_link_retries_on_collision() {
        let mut mock_repo = MockLinkRepository::new();

        // First generated code collides, second is free.
        mock_repo
            .expect_exists_by_code()
            .times(1)
            .returning(|_| Ok(true));
        mock_repo
            .expect_exists_by_code()
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .times(1)
            .returning(|new_link| Ok(test_link(&new_link.short_code, &new_link.original_url, "alice")));

        let (service, _rx) = service(mock_repo);

        let result = service
            .create_link(
                "https://example.com".to_string(),
                "alice".to_string(),
                None,
                None,
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_with_custom_alias() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists_by_code()
            .withf(|code| code == "my-alias")
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.short_code == "my-alias")
            .times(1)
            .returning(|new_link| Ok(test_link(&new_link.short_code, &new_link.original_url, "alice")));

        let (service, _rx) = service(mock_repo);

        let result = service
            .create_link(
                "https://example.com".to_string(),
                "alice".to_string(),
                Some("  my-alias ".to_string()),
                None,
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().short_code, "my-alias");
    }

    #[tokio::test]
    async fn test_create_link_alias_taken() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists_by_code()
            .withf(|code| code == "taken")
            .times(1)
            .returning(|_| Ok(true));

        mock_repo.expect_create().times(0);

        let (service, _rx) = service(mock_repo);

        let result = service
            .create_link(
                "https://example.com".to_string(),
                "alice".to_string(),
                Some("taken".to_string()),
                None,
            )
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_link_invalid_url() {
        let mock_repo = MockLinkRepository::new();
        let (service, _rx) = service(mock_repo);

        let result = service
            .create_link("not-a-url".to_string(), "alice".to_string(), None, None)
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_link_rejects_non_http_scheme() {
        let mock_repo = MockLinkRepository::new();
        let (service, _rx) = service(mock_repo);

        let result = service
            .create_link(
                "ftp://example.com".to_string(),
                "alice".to_string(),
                None,
                None,
            )
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_link_applies_default_expiry() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists_by_code()
            .times(1)
            .returning(|_| Ok(false));

        let lower = Utc::now() + Duration::days(364);
        let upper = Utc::now() + Duration::days(366);
        mock_repo
            .expect_create()
            .withf(move |new_link| new_link.expires_at > lower && new_link.expires_at < upper)
            .times(1)
            .returning(|new_link| Ok(test_link(&new_link.short_code, &new_link.original_url, "alice")));

        let (service, _rx) = service(mock_repo);

        let result = service
            .create_link(
                "https://example.com".to_string(),
                "alice".to_string(),
                None,
                None,
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_returns_url_and_enqueues_click() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_active_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(Some(test_link("abc123", "https://example.com", "alice"))));

        let (service, mut rx) = service(mock_repo);

        let result = service.resolve("abc123").await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "https://example.com");

        let event = rx.try_recv().unwrap();
        assert_eq!(event.code, "abc123");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_active_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let (service, mut rx) = service(mock_repo);

        let result = service.resolve("missing").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_expired_link() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_active_by_code()
            .times(1)
            .returning(|_| {
                let mut link = test_link("old123", "https://example.com", "alice");
                link.expires_at = Utc::now() - Duration::hours(1);
                Ok(Some(link))
            });

        let (service, mut rx) = service(mock_repo);

        let result = service.resolve("old123").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Expired { .. }));
        // No click is counted for a failed resolution.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delete_link_owner_mismatch() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_active_by_code()
            .times(1)
            .returning(|_| Ok(Some(test_link("abc123", "https://example.com", "alice"))));

        mock_repo.expect_deactivate().times(0);

        let (service, _rx) = service(mock_repo);

        let result = service.delete_link("abc123", "mallory").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_active_by_code()
            .times(1)
            .returning(|_| Ok(Some(test_link("abc123", "https://example.com", "alice"))));

        mock_repo
            .expect_deactivate()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(true));

        let (service, _rx) = service(mock_repo);

        assert!(service.delete_link("abc123", "alice").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_active_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let (service, _rx) = service(mock_repo);

        let result = service.delete_link("ghost", "alice").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_stats_for_owner_assembles_aggregates() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_count_active_for_owner()
            .times(1)
            .returning(|_| Ok(3));
        mock_repo
            .expect_total_clicks_for_owner()
            .times(1)
            .returning(|_| Ok(40));
        mock_repo
            .expect_top_by_clicks()
            .withf(|_, limit| *limit == 5)
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    test_link("a", "https://a.example.com", "alice"),
                    test_link("b", "https://b.example.com", "alice"),
                ])
            });

        let (service, _rx) = service(mock_repo);

        let stats = service.stats_for_owner("alice").await.unwrap();

        assert_eq!(stats.active_count, 3);
        assert_eq!(stats.total_clicks, 40);
        assert_eq!(stats.top_links.len(), 2);
    }

    #[test]
    fn test_short_url_formatting() {
        let mock_repo = MockLinkRepository::new();
        let (tx, _rx) = mpsc::channel(1);
        let service = LinkService::new(Arc::new(mock_repo), tx, 6, 365);

        assert_eq!(
            service.short_url("https://s.example.com/", "abc123"),
            "https://s.example.com/abc123"
        );
        assert_eq!(
            service.short_url("https://s.example.com", "abc123"),
            "https://s.example.com/abc123"
        );
    }
}
