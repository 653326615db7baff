//! Email Value Object
//!
//! Represents a normalized email address.
//! Validation is deliberately shallow: the address is a login key, not a
//! mailbox this service ever writes to.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object (trimmed, lower-cased)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with normalization and validation
    pub fn new(email: impl AsRef<str>) -> AuthResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(AuthError::Validation("Email cannot be empty".to_string()));
        }

        if email.chars().count() > EMAIL_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !email.contains('@') {
            return Err(AuthError::Validation(
                "Email must contain '@'".to_string(),
            ));
        }

        Ok(Self(email))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
        assert!(Email::new("a@b").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(matches!(Email::new(""), Err(AuthError::Validation(_))));
        assert!(matches!(Email::new("   "), Err(AuthError::Validation(_))));
        assert!(matches!(
            Email::new("userexample.com"),
            Err(AuthError::Validation(_))
        ));
        let long = format!("{}@x.com", "a".repeat(EMAIL_MAX_LENGTH));
        assert!(Email::new(long).is_err());
    }

    #[test]
    fn test_email_normalization() {
        let email = Email::new("  Ann@X.com ").unwrap();
        assert_eq!(email.as_str(), "ann@x.com");
        assert_eq!(email, "ANN@x.COM".parse().unwrap());
    }
}
