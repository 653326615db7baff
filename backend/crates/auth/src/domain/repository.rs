//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer.

use crate::domain::entity::{identity::Identity, refresh_session::RefreshSession};
use crate::domain::value_object::{IdentityId, email::Email, refresh_secret::SecretFingerprint};
use crate::error::AuthResult;

/// Identity repository trait
#[trait_variant::make(IdentityRepository: Send)]
pub trait LocalIdentityRepository {
    /// Create a new identity
    ///
    /// Fails with `AuthError::EmailTaken` if the email is already registered.
    async fn create(&self, identity: &Identity) -> AuthResult<()>;

    /// Find identity by normalized email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Identity>>;

    /// Find identity by ID
    async fn find_by_id(&self, identity_id: &IdentityId) -> AuthResult<Option<Identity>>;
}

/// Refresh session repository trait
#[trait_variant::make(RefreshSessionRepository: Send)]
pub trait LocalRefreshSessionRepository {
    /// Insert a new session row; every call creates a row
    async fn create_session(&self, session: &RefreshSession) -> AuthResult<()>;

    /// Owning identity of the usable session with this fingerprint
    ///
    /// `AuthError::SessionNotFound` if no row matches, it is revoked, or it
    /// has expired. Checked in a single read.
    async fn find_active_by_fingerprint(
        &self,
        fingerprint: &SecretFingerprint,
    ) -> AuthResult<IdentityId>;

    /// Mark the session revoked; unknown or already revoked is a no-op
    async fn revoke(&self, fingerprint: &SecretFingerprint) -> AuthResult<()>;

    /// Consume `consumed` and persist `replacement` as one atomic step
    ///
    /// The consumed row is revoked only if it is still usable and belongs to
    /// the replacement's identity; otherwise nothing changes and
    /// `AuthError::SessionNotFound` is returned. Of any number of concurrent
    /// rotations of the same fingerprint, at most one succeeds.
    async fn rotate(
        &self,
        consumed: &SecretFingerprint,
        replacement: &RefreshSession,
    ) -> AuthResult<IdentityId>;
}
