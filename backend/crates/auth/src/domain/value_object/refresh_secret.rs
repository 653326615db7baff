//! Refresh Secret Value Objects
//!
//! The plaintext refresh secret exists only in memory and in the response to
//! the caller. Storage only ever sees its [`SecretFingerprint`].

use platform::crypto::{random_bytes, sha256_hex, to_base64url};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{AuthError, AuthResult};

/// Opaque refresh secret (base64url of CSPRNG bytes)
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RefreshSecret(String);

impl RefreshSecret {
    /// Draw `len` bytes from the OS generator
    pub fn generate(len: usize) -> Self {
        let mut bytes = random_bytes(len);
        let encoded = to_base64url(&bytes);
        bytes.zeroize();
        Self(encoded)
    }

    /// Wrap a secret presented by a caller
    ///
    /// Only blank input is rejected; an unknown secret simply has no session.
    pub fn presented(mut raw: String) -> AuthResult<Self> {
        if raw.trim().is_empty() {
            raw.zeroize();
            return Err(AuthError::Validation(
                "refresh_token is required".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// One-way fingerprint safe to persist
    pub fn fingerprint(&self) -> SecretFingerprint {
        SecretFingerprint(sha256_hex(self.0.as_bytes()))
    }

    /// Plaintext, for handing to the caller exactly once
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshSecret([REDACTED])")
    }
}

/// Lowercase hex SHA-256 of a refresh secret
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretFingerprint(String);

impl SecretFingerprint {
    /// Create from database value
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::from_base64url;

    #[test]
    fn test_generated_secret_entropy() {
        let secret = RefreshSecret::generate(32);
        let decoded = from_base64url(secret.expose()).unwrap();
        assert_eq!(decoded.len(), 32);
        assert_ne!(secret.expose(), RefreshSecret::generate(32).expose());
    }

    #[test]
    fn test_fingerprint_is_deterministic_hex() {
        let a = RefreshSecret::presented("abc".to_string()).unwrap();
        let b = RefreshSecret::presented("abc".to_string()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().as_str().len(), 64);
        assert_eq!(
            a.fingerprint().as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_differs_from_secret() {
        let secret = RefreshSecret::generate(32);
        assert_ne!(secret.fingerprint().as_str(), secret.expose());
    }

    #[test]
    fn test_debug_redaction() {
        let secret = RefreshSecret::presented("topsecret".to_string()).unwrap();
        assert!(!format!("{:?}", secret).contains("topsecret"));
    }

    #[test]
    fn test_blank_presented_secret_is_validation() {
        for raw in ["", "   ", "\t\n"] {
            let result = RefreshSecret::presented(raw.to_string());
            assert!(matches!(result, Err(AuthError::Validation(_))));
        }
    }
}
