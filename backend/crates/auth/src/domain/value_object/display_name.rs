//! Display Name Value Object

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Maximum display name length in characters
const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// Human-readable name shown for an identity (trimmed, not unique)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl AsRef<str>) -> AuthResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(AuthError::Validation("Name cannot be empty".to_string()));
        }

        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "Name contains invalid control characters".to_string(),
            ));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
