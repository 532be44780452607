//! PostgreSQL implementation of refresh token repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewRefreshToken, RefreshToken};
use crate::domain::repositories::RefreshTokenRepository;
use crate::error::AppError;

/// PostgreSQL repository for refresh token storage.
///
/// Rotation runs delete-then-insert inside one transaction so the deletion
/// is visible to the insert and `UNIQUE (user_id)` can never trip on a
/// leftover row.
pub struct PgRefreshTokenRepository {
    pool: Arc<PgPool>,
}

impl PgRefreshTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn replace_for_user(&self, new_token: NewRefreshToken) -> Result<RefreshToken, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(new_token.user_id)
            .execute(&mut *tx)
            .await?;

        let token = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expiry_date)
            VALUES ($1, $2, $3)
            RETURNING id, token, user_id, expiry_date
            "#,
        )
        .bind(&new_token.token)
        .bind(new_token.user_id)
        .bind(new_token.expiry_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        let row = sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT id, token, user_id, expiry_date
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete_for_user(&self, user_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
