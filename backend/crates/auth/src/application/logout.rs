//! Logout Use Case
//!
//! Revokes the refresh session behind a secret. Always succeeds for unknown
//! or already revoked secrets; only a blank secret is rejected.

use std::sync::Arc;

use crate::domain::repository::RefreshSessionRepository;
use crate::domain::value_object::refresh_secret::RefreshSecret;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: RefreshSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: RefreshSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, refresh_token: String) -> AuthResult<()> {
        let fingerprint = RefreshSecret::presented(refresh_token)?.fingerprint();
        self.session_repo.revoke(&fingerprint).await?;

        tracing::info!("Refresh session revoked");
        Ok(())
    }
}
