//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token signer, configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, access guard
//!
//! ## Features
//! - Registration and login with email + password
//! - Short-lived HS256 access tokens (stateless verification)
//! - Long-lived opaque refresh tokens, rotated on every use
//! - Logout by refresh token revocation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Refresh secrets stored only as SHA-256 fingerprints
//! - Rotation consumes the old session in the same transaction that stores
//!   the new one, so a secret can be redeemed at most once
//! - Unknown email and wrong password are indistinguishable to callers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{AuthenticatedIdentity, TokenSigner};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
