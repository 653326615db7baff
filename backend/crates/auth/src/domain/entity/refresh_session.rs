//! Refresh Session Entity
//!
//! One row per issued refresh secret. Rows are revoked, never deleted, so an
//! identity's sessions form an append-only history.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{IdentityId, RefreshSessionId, refresh_secret::SecretFingerprint};

/// Refresh session entity
#[derive(Debug, Clone)]
pub struct RefreshSession {
    /// Row id (internal only)
    pub session_id: RefreshSessionId,
    pub identity_id: IdentityId,
    /// SHA-256 of the refresh secret; the secret itself is never stored
    pub fingerprint: SecretFingerprint,
    /// Informational client metadata
    pub user_agent: Option<String>,
    pub client_address: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshSession {
    /// Create a new active session
    pub fn new(
        identity_id: IdentityId,
        fingerprint: SecretFingerprint,
        user_agent: Option<String>,
        client_address: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: RefreshSessionId::new(),
            identity_id,
            fingerprint,
            user_agent,
            client_address,
            expires_at,
            created_at: Utc::now(),
            revoked: false,
        }
    }

    /// Usable iff not revoked and strictly before expiry
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: DateTime<Utc>) -> RefreshSession {
        RefreshSession::new(
            IdentityId::new(),
            SecretFingerprint::from_db("f"),
            None,
            None,
            expires_at,
        )
    }

    #[test]
    fn test_new_session_is_usable() {
        let now = Utc::now();
        let s = session(now + Duration::minutes(5));
        assert!(!s.revoked);
        assert!(s.is_usable(now));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let now = Utc::now();
        let s = session(now);
        assert!(!s.is_usable(now));
        assert!(s.is_usable(now - Duration::seconds(1)));
    }

    #[test]
    fn test_revoked_session_is_not_usable() {
        let now = Utc::now();
        let mut s = session(now + Duration::minutes(5));
        s.revoked = true;
        assert!(!s.is_usable(now));
    }
}
