//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for short link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            INSERT INTO short_links (original_url, short_code, username, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, original_url, short_code, username, created_at,
                      expires_at, click_count, is_active
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .bind(&new_link.username)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, original_url, short_code, username, created_at,
                   expires_at, click_count, is_active
            FROM short_links
            WHERE short_code = $1 AND is_active
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM short_links WHERE short_code = $1)",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn list_for_owner(
        &self,
        username: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortLink>, AppError> {
        let links = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, original_url, short_code, username, created_at,
                   expires_at, click_count, is_active
            FROM short_links
            WHERE username = $1 AND is_active
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(username)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn count_active_for_owner(&self, username: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM short_links WHERE username = $1 AND is_active",
        )
        .bind(username)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn total_clicks_for_owner(&self, username: &str) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(click_count), 0)::BIGINT
            FROM short_links
            WHERE username = $1 AND is_active
            "#,
        )
        .bind(username)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(total)
    }

    async fn top_by_clicks(&self, username: &str, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let links = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, original_url, short_code, username, created_at,
                   expires_at, click_count, is_active
            FROM short_links
            WHERE username = $1 AND is_active
            ORDER BY click_count DESC
            LIMIT $2
            "#,
        )
        .bind(username)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn increment_click_count(&self, code: &str) -> Result<(), AppError> {
        // Single atomic UPDATE expression; concurrent redirects never lose counts.
        sqlx::query("UPDATE short_links SET click_count = click_count + 1 WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn deactivate(&self, code: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE short_links SET is_active = FALSE WHERE short_code = $1 AND is_active")
                .bind(code)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
