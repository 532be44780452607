//! Authentication service: registration, login, token refresh, logout, and
//! cached access-token validation.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::NewUser;
use crate::domain::repositories::{RefreshTokenRepository, UserRepository};
use crate::domain::token_signer::{TokenSigner, TokenValidation};
use crate::error::AppError;
use crate::infrastructure::cache::ValidationCache;
use crate::utils::password::{hash_password, verify_password};

use super::refresh_token_service::RefreshTokenService;

/// Token pair handed to a client after registration, login, or refresh.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub username: String,
    pub email: String,
}

/// Service orchestrating credentials, access tokens, and refresh tokens.
///
/// Access-token validation is read-through cached: hits skip the signer
/// entirely, misses consult it, and only positive results are stored.
pub struct AuthService<U: UserRepository, R: RefreshTokenRepository> {
    user_repository: Arc<U>,
    refresh_tokens: Arc<RefreshTokenService<R, U>>,
    signer: Arc<dyn TokenSigner>,
    validation_cache: Arc<dyn ValidationCache>,
}

impl<U: UserRepository, R: RefreshTokenRepository> AuthService<U, R> {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<U>,
        refresh_tokens: Arc<RefreshTokenService<R, U>>,
        signer: Arc<dyn TokenSigner>,
        validation_cache: Arc<dyn ValidationCache>,
    ) -> Self {
        Self {
            user_repository,
            refresh_tokens,
            signer,
            validation_cache,
        }
    }

    /// Registers a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, AppError> {
        let username = username.trim();
        let email = email.trim().to_lowercase();

        if self.user_repository.exists_by_username(username).await? {
            return Err(AppError::conflict(
                "Username already exists",
                json!({ "username": username }),
            ));
        }

        if self.user_repository.exists_by_email(&email).await? {
            return Err(AppError::conflict(
                "Email already exists",
                json!({ "email": email }),
            ));
        }

        let password_hash = hash_password(password)?;

        let user = self
            .user_repository
            .create(NewUser {
                username: username.to_string(),
                email,
                password_hash,
            })
            .await?;

        info!(username = %user.username, "User registered");

        let access_token = self.signer.sign(&user.username)?;
        let refresh_token = self.refresh_tokens.issue(user.id).await?;

        Ok(AuthTokens {
            access_token,
            refresh_token: refresh_token.token,
            username: user.username,
            email: user.email,
        })
    }

    /// Authenticates credentials and issues a fresh token pair.
    ///
    /// Unknown usernames and wrong passwords produce the same error so the
    /// response does not reveal which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthTokens, AppError> {
        let username = username.trim();

        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Invalid username or password", json!({}))
            })?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::unauthorized(
                "Invalid username or password",
                json!({}),
            ));
        }

        let access_token = self.signer.sign(&user.username)?;
        let refresh_token = self.refresh_tokens.issue(user.id).await?;

        debug!(username = %user.username, "User logged in");

        Ok(AuthTokens {
            access_token,
            refresh_token: refresh_token.token,
            username: user.username,
            email: user.email,
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The refresh token itself is returned unchanged; it stays valid for
    /// repeated use until its TTL elapses or a new login rotates it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown refresh token.
    /// Returns [`AppError::Expired`] for an expired one (which is deleted).
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, AppError> {
        let stored = self.refresh_tokens.verify(refresh_token).await?;

        let user = self
            .user_repository
            .find_by_id(stored.user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("User not found", json!({ "user_id": stored.user_id }))
            })?;

        let access_token = self.signer.sign(&user.username)?;

        Ok(AuthTokens {
            access_token,
            refresh_token: stored.token,
            username: user.username,
            email: user.email,
        })
    }

    /// Logs an owner out: revokes their refresh tokens and evicts their
    /// entry from the validation cache's owner namespace.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this username.
    pub async fn logout(&self, username: &str) -> Result<(), AppError> {
        self.refresh_tokens.revoke_for_owner(username).await?;

        if let Err(e) = self.validation_cache.evict_owner(username).await {
            warn!(username, error = %e, "Failed to evict validation cache entry");
        }

        info!(username, "User logged out");

        Ok(())
    }

    /// Validates an access token, serving cached positives.
    ///
    /// Cache miss or cache error falls through to the signer. Only
    /// `valid == true` results are cached, so a rejected token is re-checked
    /// on every call; a cached positive can be served for up to the cache TTL
    /// after the underlying token is invalidated elsewhere.
    pub async fn validate_token(&self, token: &str) -> TokenValidation {
        match self.validation_cache.get(token).await {
            Ok(Some(cached)) => return cached,
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Validation cache read failed"),
        }

        let validation = self.signer.verify(token);

        if validation.valid {
            if let Err(e) = self.validation_cache.put(token, &validation).await {
                warn!(error = %e, "Validation cache write failed");
            }
        }

        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RefreshToken, User};
    use crate::domain::repositories::{MockRefreshTokenRepository, MockUserRepository};
    use crate::domain::token_signer::MockTokenSigner;
    use crate::infrastructure::cache::{MemoryValidationCache, NullCache};
    use chrono::{Duration, Utc};

    fn test_user(id: i64, username: &str, password: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn build_service(
        mock_users: MockUserRepository,
        mock_tokens: MockRefreshTokenRepository,
        mock_signer: MockTokenSigner,
        cache: Arc<dyn ValidationCache>,
    ) -> AuthService<MockUserRepository, MockRefreshTokenRepository> {
        let users = Arc::new(mock_users);
        let refresh_tokens = Arc::new(RefreshTokenService::new(
            Arc::new(mock_tokens),
            users.clone(),
            86_400,
        ));
        AuthService::new(users, refresh_tokens, Arc::new(mock_signer), cache)
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(true));
        mock_users.expect_create().times(0);

        let service = build_service(
            mock_users,
            MockRefreshTokenRepository::new(),
            MockTokenSigner::new(),
            Arc::new(NullCache::new()),
        );

        let result = service
            .register("alice", "alice@example.com", "hunter22")
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_register_issues_token_pair() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(false));
        mock_users
            .expect_exists_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(|_| Ok(false));
        mock_users
            .expect_create()
            .withf(|new_user| new_user.password_hash.starts_with("$argon2"))
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: 42,
                    username: new_user.username,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    created_at: Utc::now(),
                })
            });
        // issue() resolves the owner before rotating
        mock_users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_user(id, "alice", "hunter22"))));

        let mut mock_tokens = MockRefreshTokenRepository::new();
        mock_tokens
            .expect_replace_for_user()
            .times(1)
            .returning(|new_token| {
                Ok(RefreshToken {
                    id: 1,
                    token: new_token.token,
                    user_id: new_token.user_id,
                    expiry_date: new_token.expiry_date,
                })
            });

        let mut mock_signer = MockTokenSigner::new();
        mock_signer
            .expect_sign()
            .withf(|u| u == "alice")
            .times(1)
            .returning(|_| Ok("signed.access.token".to_string()));

        let service = build_service(
            mock_users,
            mock_tokens,
            mock_signer,
            Arc::new(NullCache::new()),
        );

        let tokens = service
            .register("alice", "Alice@Example.COM", "hunter22")
            .await
            .unwrap();

        assert_eq!(tokens.access_token, "signed.access.token");
        assert_eq!(tokens.refresh_token.len(), 43);
        assert_eq!(tokens.username, "alice");
        assert_eq!(tokens.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(test_user(42, "alice", "correct-password"))));

        let service = build_service(
            mock_users,
            MockRefreshTokenRepository::new(),
            MockTokenSigner::new(),
            Arc::new(NullCache::new()),
        );

        let result = service.login("alice", "wrong-password").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_user_same_error() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = build_service(
            mock_users,
            MockRefreshTokenRepository::new(),
            MockTokenSigner::new(),
            Arc::new(NullCache::new()),
        );

        let err = service.login("ghost", "whatever").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[tokio::test]
    async fn test_login_rotates_refresh_token() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(test_user(42, "alice", "hunter22"))));
        mock_users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_user(id, "alice", "hunter22"))));

        let mut mock_tokens = MockRefreshTokenRepository::new();
        mock_tokens
            .expect_replace_for_user()
            .withf(|new_token| new_token.user_id == 42)
            .times(1)
            .returning(|new_token| {
                Ok(RefreshToken {
                    id: 7,
                    token: new_token.token,
                    user_id: new_token.user_id,
                    expiry_date: new_token.expiry_date,
                })
            });

        let mut mock_signer = MockTokenSigner::new();
        mock_signer
            .expect_sign()
            .times(1)
            .returning(|_| Ok("signed.access.token".to_string()));

        let service = build_service(
            mock_users,
            mock_tokens,
            mock_signer,
            Arc::new(NullCache::new()),
        );

        let tokens = service.login("alice", "hunter22").await.unwrap();

        assert_eq!(tokens.username, "alice");
        assert!(!tokens.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_echoes_same_refresh_token() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_id()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|id| Ok(Some(test_user(id, "alice", "hunter22"))));

        let mut mock_tokens = MockRefreshTokenRepository::new();
        mock_tokens
            .expect_find_by_token()
            .withf(|t| t == "the-refresh-token")
            .times(1)
            .returning(|t| {
                Ok(Some(RefreshToken {
                    id: 7,
                    token: t.to_string(),
                    user_id: 42,
                    expiry_date: Utc::now() + Duration::hours(12),
                }))
            });
        // Verification never rotates the stored token.
        mock_tokens.expect_replace_for_user().times(0);

        let mut mock_signer = MockTokenSigner::new();
        mock_signer
            .expect_sign()
            .withf(|u| u == "alice")
            .times(1)
            .returning(|_| Ok("new.access.token".to_string()));

        let service = build_service(
            mock_users,
            mock_tokens,
            mock_signer,
            Arc::new(NullCache::new()),
        );

        let tokens = service.refresh("the-refresh-token").await.unwrap();

        assert_eq!(tokens.access_token, "new.access.token");
        assert_eq!(tokens.refresh_token, "the-refresh-token");
    }

    #[tokio::test]
    async fn test_validate_invalid_is_never_cached() {
        let mut mock_signer = MockTokenSigner::new();
        mock_signer
            .expect_verify()
            .times(2)
            .returning(|_| TokenValidation::invalid());

        let service = build_service(
            MockUserRepository::new(),
            MockRefreshTokenRepository::new(),
            mock_signer,
            Arc::new(MemoryValidationCache::new(300)),
        );

        assert!(!service.validate_token("bad-token").await.valid);
        // Second call hits the signer again: negatives are recomputed.
        assert!(!service.validate_token("bad-token").await.valid);
    }

    #[tokio::test]
    async fn test_validate_positive_is_served_from_cache() {
        let mut mock_signer = MockTokenSigner::new();
        mock_signer
            .expect_verify()
            .times(1)
            .returning(|_| TokenValidation::valid("alice"));

        let service = build_service(
            MockUserRepository::new(),
            MockRefreshTokenRepository::new(),
            mock_signer,
            Arc::new(MemoryValidationCache::new(300)),
        );

        let first = service.validate_token("good-token").await;
        // Served from cache; the signer's times(1) proves it is not re-asked
        // even if it would now reject the token.
        let second = service.validate_token("good-token").await;

        assert!(first.valid);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_logout_leaves_cached_positive_validation() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(test_user(42, "alice", "hunter22"))));

        let mut mock_tokens = MockRefreshTokenRepository::new();
        mock_tokens
            .expect_delete_for_user()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| Ok(1));

        let mut mock_signer = MockTokenSigner::new();
        mock_signer
            .expect_verify()
            .times(1)
            .returning(|_| TokenValidation::valid("alice"));

        let service = build_service(
            mock_users,
            mock_tokens,
            mock_signer,
            Arc::new(MemoryValidationCache::new(300)),
        );

        assert!(service.validate_token("alices-token").await.valid);

        service.logout("alice").await.unwrap();

        // Eviction targets the owner namespace; the token-keyed positive is
        // still served until its TTL elapses (bounded staleness).
        assert!(service.validate_token("alices-token").await.valid);
    }
}
