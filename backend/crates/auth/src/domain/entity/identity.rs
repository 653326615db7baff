//! Identity Entity
//!
//! A registered principal. Created on registration and never mutated or
//! deleted by this crate.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    IdentityId, display_name::DisplayName, email::Email, password::UserPassword,
};

/// Identity entity
#[derive(Debug, Clone)]
pub struct Identity {
    /// Internal UUID identifier
    pub identity_id: IdentityId,
    pub display_name: DisplayName,
    /// Normalized, unique
    pub email: Email,
    pub password: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity with a fresh id
    pub fn new(display_name: DisplayName, email: Email, password: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            identity_id: IdentityId::new(),
            display_name,
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }
}
