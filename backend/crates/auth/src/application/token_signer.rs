//! Token Signer
//!
//! Issues and verifies HS256 access tokens and mints opaque refresh secrets.
//! Access tokens are self-contained: verifying one needs no storage lookup.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::{AuthConfig, MIN_JWT_SECRET_LENGTH, MIN_REFRESH_SECRET_LENGTH};
use crate::domain::value_object::{IdentityId, refresh_secret::RefreshSecret};
use crate::error::{AuthError, AuthResult};

/// The only accepted signing algorithm
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (identity ID)
    pub sub: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiration (seconds since epoch)
    pub exp: i64,
}

/// Access token signer
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
    refresh_secret_len: usize,
}

impl TokenSigner {
    /// Build a signer from configuration
    ///
    /// Rejects zero lifetimes, a signing secret shorter than 32 bytes and a
    /// refresh secret shorter than 16 bytes.
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        if config.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "JWT secret must be at least {} bytes",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if config.refresh_secret_len < MIN_REFRESH_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "Refresh secret must be at least {} bytes",
                MIN_REFRESH_SECRET_LENGTH
            )));
        }

        let access_ttl = positive_ttl("access", config.access_token_ttl)?;
        let refresh_ttl = positive_ttl("refresh", config.refresh_token_ttl)?;

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            access_ttl,
            refresh_ttl,
            refresh_secret_len: config.refresh_secret_len,
        })
    }

    /// Sign an access token for `identity_id`
    pub fn issue_access(&self, identity_id: IdentityId) -> AuthResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + self.access_ttl;
        let claims = AccessClaims {
            sub: identity_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign access token: {e}")))?;

        Ok((token, expires_at))
    }

    /// Verify an access token and return its subject
    ///
    /// `TokenMalformed` when the token cannot be decoded; `TokenInvalid` for a
    /// bad signature, a foreign algorithm, a passed expiry or a subject that is
    /// not an identity id.
    pub fn verify_access(&self, token: &str) -> AuthResult<IdentityId> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(e.kind()))?;

        data.claims
            .sub
            .parse()
            .map_err(|_| AuthError::TokenInvalid)
    }

    /// Mint a refresh secret and its expiry
    pub fn issue_refresh_secret(&self) -> (RefreshSecret, DateTime<Utc>) {
        (
            RefreshSecret::generate(self.refresh_secret_len),
            Utc::now() + self.refresh_ttl,
        )
    }
}

fn positive_ttl(name: &str, ttl: std::time::Duration) -> AuthResult<Duration> {
    if ttl.is_zero() {
        return Err(AuthError::Configuration(format!(
            "{name} token lifetime must be greater than zero"
        )));
    }
    Duration::from_std(ttl)
        .map_err(|_| AuthError::Configuration(format!("{name} token lifetime is out of range")))
}

fn classify(kind: &JwtErrorKind) -> AuthError {
    match kind {
        JwtErrorKind::InvalidToken
        | JwtErrorKind::Base64(_)
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_) => AuthError::TokenMalformed,
        _ => AuthError::TokenInvalid,
    }
}
