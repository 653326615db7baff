//! In-Memory Repository Implementation
//!
//! Same semantics as the PostgreSQL repository, for tests and local runs.
//! A single lock guards all state, so `rotate` is atomic with respect to
//! every other operation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::entity::{identity::Identity, refresh_session::RefreshSession};
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::domain::value_object::{IdentityId, email::Email, refresh_secret::SecretFingerprint};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    identities: HashMap<IdentityId, Identity>,
    /// Append-only; rows are revoked in place, never removed
    sessions: Vec<RefreshSession>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every session row ever created for `identity_id`
    pub async fn sessions_of(&self, identity_id: &IdentityId) -> Vec<RefreshSession> {
        let state = self.state.lock().await;
        state
            .sessions
            .iter()
            .filter(|s| &s.identity_id == identity_id)
            .cloned()
            .collect()
    }
}

impl IdentityRepository for InMemoryAuthRepository {
    async fn create(&self, identity: &Identity) -> AuthResult<()> {
        let mut state = self.state.lock().await;
        if state
            .identities
            .values()
            .any(|existing| existing.email == identity.email)
        {
            return Err(AuthError::EmailTaken);
        }
        state
            .identities
            .insert(identity.identity_id, identity.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Identity>> {
        let state = self.state.lock().await;
        Ok(state
            .identities
            .values()
            .find(|identity| &identity.email == email)
            .cloned())
    }

    async fn find_by_id(&self, identity_id: &IdentityId) -> AuthResult<Option<Identity>> {
        let state = self.state.lock().await;
        Ok(state.identities.get(identity_id).cloned())
    }
}

impl RefreshSessionRepository for InMemoryAuthRepository {
    async fn create_session(&self, session: &RefreshSession) -> AuthResult<()> {
        self.state.lock().await.sessions.push(session.clone());
        Ok(())
    }

    async fn find_active_by_fingerprint(
        &self,
        fingerprint: &SecretFingerprint,
    ) -> AuthResult<IdentityId> {
        let now = Utc::now();
        let state = self.state.lock().await;
        state
            .sessions
            .iter()
            .find(|s| &s.fingerprint == fingerprint && s.is_usable(now))
            .map(|s| s.identity_id)
            .ok_or(AuthError::SessionNotFound)
    }

    async fn revoke(&self, fingerprint: &SecretFingerprint) -> AuthResult<()> {
        let mut state = self.state.lock().await;
        for session in state
            .sessions
            .iter_mut()
            .filter(|s| &s.fingerprint == fingerprint)
        {
            session.revoked = true;
        }
        Ok(())
    }

    async fn rotate(
        &self,
        consumed: &SecretFingerprint,
        replacement: &RefreshSession,
    ) -> AuthResult<IdentityId> {
        let now = Utc::now();
        let mut state = self.state.lock().await;

        let position = state
            .sessions
            .iter()
            .position(|s| &s.fingerprint == consumed && s.is_usable(now))
            .ok_or(AuthError::SessionNotFound)?;

        if state.sessions[position].identity_id != replacement.identity_id {
            return Err(AuthError::SessionNotFound);
        }

        state.sessions[position].revoked = true;
        state.sessions.push(replacement.clone());

        Ok(replacement.identity_id)
    }
}
