//! User entity referenced by short links and refresh tokens.

use chrono::{DateTime, Utc};

/// An account that owns short links and refresh tokens.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a user. `password_hash` is already hashed;
/// plaintext passwords never reach the persistence layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
