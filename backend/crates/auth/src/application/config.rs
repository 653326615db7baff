//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared immutably.

use std::fmt;
use std::time::Duration;

use platform::crypto::random_bytes;

/// Re-export HashCost from platform
pub use platform::password::HashCost;

/// Minimum signing secret length in bytes
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Minimum refresh secret length in bytes (128 bits)
pub const MIN_REFRESH_SECRET_LENGTH: usize = 16;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key for access tokens
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh session lifetime (1 week)
    pub refresh_token_ttl: Duration,
    /// Random bytes per refresh secret
    pub refresh_secret_len: usize,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id cost for new hashes
    pub password_hash_cost: HashCost,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            access_token_ttl: Duration::from_secs(15 * 60), // 15 minutes
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            refresh_secret_len: 32,
            password_pepper: None,
            password_hash_cost: HashCost::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self {
            jwt_secret: random_bytes(MIN_JWT_SECRET_LENGTH),
            ..Default::default()
        }
    }

    /// Create config for development (random secret, cheap hashing)
    pub fn development() -> Self {
        Self {
            password_hash_cost: HashCost::minimal(),
            ..Self::with_random_secret()
        }
    }

    /// Access token lifetime in whole seconds (the `expires_in` value)
    pub fn access_token_ttl_secs(&self) -> u64 {
        self.access_token_ttl.as_secs()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("refresh_secret_len", &self.refresh_secret_len)
            .field("password_pepper", &self.pepper().map(|_| "[REDACTED]"))
            .field("password_hash_cost", &self.password_hash_cost)
            .finish()
    }
}
