//! Refresh Use Case
//!
//! Exchanges a refresh secret for a new token pair, consuming the old one.

use std::sync::Arc;

use platform::client::ClientMetadata;

use crate::application::config::AuthConfig;
use crate::application::login::{AuthTokens, TOKEN_TYPE};
use crate::application::token_signer::TokenSigner;
use crate::domain::entity::refresh_session::RefreshSession;
use crate::domain::repository::RefreshSessionRepository;
use crate::domain::value_object::refresh_secret::RefreshSecret;
use crate::error::AuthResult;

/// Refresh use case
pub struct RefreshUseCase<S>
where
    S: RefreshSessionRepository,
{
    session_repo: Arc<S>,
    signer: Arc<TokenSigner>,
    config: Arc<AuthConfig>,
}

impl<S> RefreshUseCase<S>
where
    S: RefreshSessionRepository,
{
    pub fn new(session_repo: Arc<S>, signer: Arc<TokenSigner>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            signer,
            config,
        }
    }

    /// Rotate the session behind `refresh_token`
    ///
    /// Both new credentials are minted before the single commit in
    /// `rotate`; if that commit loses a race the old session is already
    /// consumed by the winner and this call fails with `SessionNotFound`.
    pub async fn execute(&self, refresh_token: String, client: ClientMetadata) -> AuthResult<AuthTokens> {
        let presented = RefreshSecret::presented(refresh_token)?;
        let consumed = presented.fingerprint();

        let identity_id = self
            .session_repo
            .find_active_by_fingerprint(&consumed)
            .await?;

        let (access_token, _) = self.signer.issue_access(identity_id)?;
        let (refresh_secret, refresh_expires_at) = self.signer.issue_refresh_secret();
        let client_address = client.address_string();

        let replacement = RefreshSession::new(
            identity_id,
            refresh_secret.fingerprint(),
            client.user_agent,
            client_address,
            refresh_expires_at,
        );
        self.session_repo.rotate(&consumed, &replacement).await?;

        tracing::info!(
            identity_id = %identity_id,
            session_id = %replacement.session_id,
            "Refresh session rotated"
        );

        Ok(AuthTokens {
            access_token,
            refresh_token: refresh_secret.expose().to_string(),
            token_type: TOKEN_TYPE,
            expires_in: self.config.access_token_ttl_secs(),
        })
    }
}
