//! Repository trait definitions for the domain layer.
//!
//! Traits define the contracts for data access; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.

pub mod link_repository;
pub mod refresh_token_repository;
pub mod user_repository;

pub use link_repository::{LinkRepository, OwnerStats};
pub use refresh_token_repository::RefreshTokenRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use refresh_token_repository::MockRefreshTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
