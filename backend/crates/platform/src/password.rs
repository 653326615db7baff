//! Password Hashing and Verification
//!
//! Credential hashing with:
//! - Argon2id (memory-hard, adaptive cost)
//! - Per-call random salt (identical passwords never share an encoding)
//! - Optional application-wide pepper
//! - Zeroization of clear text on drop
//!
//! Verification never errors: a mismatch or an unparseable stored hash both
//! yield `false`.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::random_bytes;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in code points
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Argon2 refused the configured cost parameters
    #[error("Invalid hash cost: {0}")]
    InvalidCost(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Hash cost
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommended: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Smallest cost Argon2 accepts. Only for tests and local tooling.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Unicode NFKC normalized on construction
/// - Not `Clone`, to avoid stray copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a password for a new credential, enforcing the policy
    ///
    /// - at least [`MIN_PASSWORD_LENGTH`] code points
    /// - at most [`MAX_PASSWORD_LENGTH`] code points
    /// - not empty or whitespace only
    /// - no control characters other than space, tab and newline
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw);
        password.check_policy()?;
        Ok(password)
    }

    /// Create a password that is only going to be verified
    ///
    /// No policy is applied: a stored credential is checked as-is.
    pub fn for_verification(raw: String) -> Self {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        if self.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = self.0.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if self
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format (algorithm, version, params, salt, hash)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored value without parsing it
    ///
    /// A corrupt value simply never verifies.
    pub fn from_db(s: impl Into<String>) -> Self {
        Self { hash: s.into() }
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Credential Hasher
// ============================================================================

/// Argon2id hasher configured once at startup
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    pepper: Option<Vec<u8>>,
    /// Hash of random bytes, verified against when there is no real hash so
    /// both failure paths of a login cost the same
    dummy: HashedPassword,
}

impl CredentialHasher {
    pub fn new(cost: HashCost, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut hasher = Self {
            argon2,
            pepper,
            dummy: HashedPassword::from_db(String::new()),
        };
        let mut filler = random_bytes(32);
        hasher.dummy = hasher.hash_bytes(&filler)?;
        filler.zeroize();

        Ok(hasher)
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        self.hash_bytes(password.as_bytes())
    }

    /// Verify a password against a stored hash
    ///
    /// Uses the parameters embedded in the stored hash, so hashes made at an
    /// older cost keep verifying. Argon2 compares in constant time.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&hashed.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let mut peppered = self.peppered(password.as_bytes());
        let valid = self
            .argon2
            .verify_password(&peppered, &parsed_hash)
            .is_ok();
        peppered.zeroize();
        valid
    }

    /// Burn one verification's worth of work; always `false`
    pub fn verify_dummy(&self, password: &ClearTextPassword) -> bool {
        self.verify(password, &self.dummy);
        false
    }

    fn hash_bytes(&self, bytes: &[u8]) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let mut peppered = self.peppered(bytes);

        let hash = self
            .argon2
            .hash_password(&peppered, &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));
        peppered.zeroize();

        Ok(HashedPassword { hash: hash? })
    }

    fn peppered(&self, bytes: &[u8]) -> Vec<u8> {
        let mut combined = bytes.to_vec();
        if let Some(pepper) = &self.pepper {
            combined.extend_from_slice(pepper);
        }
        combined
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("params", self.argon2.params())
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(HashCost::minimal(), None).unwrap()
    }

    fn clear(s: &str) -> ClearTextPassword {
        ClearTextPassword::for_verification(s.to_string())
    }

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("ab".to_string());
        assert_eq!(
            result.err(),
            Some(PasswordPolicyError::TooShort { min: 6, actual: 2 })
        );
    }

    #[test]
    fn test_password_minimum_length_accepted() {
        assert!(ClearTextPassword::new("secret".to_string()).is_ok());
        assert!(ClearTextPassword::new("secret1".to_string()).is_ok());
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("        ".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("abc\u{0007}def".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_unicode_counts_code_points() {
        // 6 code points, 18 bytes
        assert!(ClearTextPassword::new("パスワード安".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let password = clear("secret1");
        let hashed = hasher.hash(&password).unwrap();

        assert!(hasher.verify(&password, &hashed));
        assert!(!hasher.verify(&clear("secret2"), &hashed));
    }

    #[test]
    fn test_hash_is_salted_per_call() {
        let hasher = hasher();
        let a = hasher.hash(&clear("secret1")).unwrap();
        let b = hasher.hash(&clear("secret1")).unwrap();

        assert_ne!(a.as_phc_string(), b.as_phc_string());
        assert!(a.as_phc_string().starts_with("$argon2id$"));
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = CredentialHasher::new(HashCost::minimal(), Some(b"pepper".to_vec())).unwrap();
        let plain = hasher();
        let password = clear("secret1");
        let hashed = peppered.hash(&password).unwrap();

        assert!(peppered.verify(&password, &hashed));
        assert!(!plain.verify(&password, &hashed));
    }

    #[test]
    fn test_verify_uses_stored_params() {
        let cheap = hasher();
        let other = CredentialHasher::new(
            HashCost {
                memory_kib: 64,
                iterations: 2,
                parallelism: 1,
            },
            None,
        )
        .unwrap();
        let password = clear("secret1");
        let hashed = cheap.hash(&password).unwrap();

        assert!(other.verify(&password, &hashed));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let hasher = hasher();
        let password = clear("secret1");

        assert!(!hasher.verify(&password, &HashedPassword::from_db("not_a_valid_hash")));
        assert!(!hasher.verify(&password, &HashedPassword::from_db("")));
        assert!(!hasher.verify(&password, &HashedPassword::from_db("$argon2id$v=19$garbage")));
    }

    #[test]
    fn test_verify_dummy_is_false() {
        assert!(!hasher().verify_dummy(&clear("anything")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = hasher();
        let password = clear("secret1");
        let hashed = hasher.hash(&password).unwrap();

        let restored = HashedPassword::from_db(hashed.as_phc_string());
        assert!(restored.as_phc_string().starts_with("$argon2id$v=19$"));
        assert!(hasher.verify(&password, &restored));
    }

    #[test]
    fn test_invalid_cost() {
        let result = CredentialHasher::new(
            HashCost {
                memory_kib: 1,
                iterations: 0,
                parallelism: 1,
            },
            None,
        );
        assert!(matches!(result, Err(PasswordHashError::InvalidCost(_))));
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", clear("secret1"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret1"));

        let hashed = hasher().hash(&clear("secret1")).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
