//! Login Use Case
//!
//! Authenticates an identity and opens a refresh session.

use std::sync::Arc;

use platform::client::ClientMetadata;
use platform::password::CredentialHasher;

use crate::application::config::AuthConfig;
use crate::application::token_signer::TokenSigner;
use crate::domain::entity::refresh_session::RefreshSession;
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::domain::value_object::{email::Email, password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Token type reported to callers
pub const TOKEN_TYPE: &str = "Bearer";

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Token pair handed to the caller
///
/// The refresh token is plaintext and is returned exactly once.
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds
    pub expires_in: u64,
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: IdentityRepository + RefreshSessionRepository,
{
    repo: Arc<R>,
    hasher: Arc<CredentialHasher>,
    signer: Arc<TokenSigner>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: IdentityRepository + RefreshSessionRepository,
{
    pub fn new(
        repo: Arc<R>,
        hasher: Arc<CredentialHasher>,
        signer: Arc<TokenSigner>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            hasher,
            signer,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput, client: ClientMetadata) -> AuthResult<AuthTokens> {
        let raw_password = RawPassword::for_login(input.password);

        // A malformed email cannot belong to anyone: same answer as unknown
        let identity = match Email::new(&input.email) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let identity = match identity {
            Some(identity) if identity.password.verify(&self.hasher, &raw_password) => identity,
            Some(_) => return Err(AuthError::InvalidCredentials),
            None => {
                self.hasher.verify_dummy(raw_password.as_clear_text());
                return Err(AuthError::InvalidCredentials);
            }
        };

        let (access_token, _) = self.signer.issue_access(identity.identity_id)?;
        let (refresh_secret, refresh_expires_at) = self.signer.issue_refresh_secret();
        let client_address = client.address_string();

        let session = RefreshSession::new(
            identity.identity_id,
            refresh_secret.fingerprint(),
            client.user_agent,
            client_address,
            refresh_expires_at,
        );
        self.repo.create_session(&session).await?;

        tracing::info!(
            identity_id = %identity.identity_id,
            session_id = %session.session_id,
            "Identity logged in"
        );

        Ok(AuthTokens {
            access_token,
            refresh_token: refresh_secret.expose().to_string(),
            token_type: TOKEN_TYPE,
            expires_in: self.config.access_token_ttl_secs(),
        })
    }
}
