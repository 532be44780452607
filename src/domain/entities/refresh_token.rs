//! Refresh token entity with single-active-token-per-owner semantics.

use chrono::{DateTime, Utc};

/// A stored refresh token.
///
/// At most one row exists per `user_id` at any instant; issuing a new token
/// replaces any prior one for the same owner.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub expiry_date: DateTime<Utc>,
}

impl RefreshToken {
    /// Returns true if the token has passed its expiry date.
    pub fn is_expired(&self) -> bool {
        self.expiry_date < Utc::now()
    }
}

/// Input data for inserting a refresh token.
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub token: String,
    pub user_id: i64,
    pub expiry_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_future_expiry_is_live() {
        let token = RefreshToken {
            id: 1,
            token: "opaque".to_string(),
            user_id: 42,
            expiry_date: Utc::now() + Duration::hours(24),
        };
        assert!(!token.is_expired());
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let token = RefreshToken {
            id: 1,
            token: "opaque".to_string(),
            user_id: 42,
            expiry_date: Utc::now() - Duration::seconds(1),
        };
        assert!(token.is_expired());
    }
}
