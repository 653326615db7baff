//! Password Value Objects
//!
//! Domain wrappers around `platform::password`. The domain never sees a
//! plaintext outside [`RawPassword`], which zeroizes itself on drop.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::password::{RawPassword, UserPassword};
//! use platform::password::{CredentialHasher, HashCost};
//!
//! let hasher = CredentialHasher::new(HashCost::minimal(), None).unwrap();
//! let raw = RawPassword::new("secret1".to_string()).unwrap();
//! let stored = UserPassword::from_raw(&hasher, &raw).unwrap();
//! assert!(stored.verify(&hasher, &raw));
//! ```

use platform::password::{ClearTextPassword, CredentialHasher, HashedPassword};
use std::fmt;

use crate::error::AuthResult;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Password chosen at registration: policy enforced
    pub fn new(raw: String) -> AuthResult<Self> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }

    /// Password presented at login: verified as-is
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    pub(crate) fn as_clear_text(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

// ============================================================================
// User Password (Stored Hash)
// ============================================================================

/// Stored password hash of an identity
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(hasher: &CredentialHasher, raw: &RawPassword) -> AuthResult<Self> {
        Ok(Self(hasher.hash(raw.as_clear_text())?))
    }

    /// Create from database value
    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(HashedPassword::from_db(hash))
    }

    pub fn verify(&self, hasher: &CredentialHasher, raw: &RawPassword) -> bool {
        hasher.verify(raw.as_clear_text(), &self.0)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}
