//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{identity::Identity, refresh_session::RefreshSession};
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::domain::value_object::{
    IdentityId, display_name::DisplayName, email::Email, password::UserPassword,
    refresh_secret::SecretFingerprint,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Identity Repository Implementation
// ============================================================================

impl IdentityRepository for PgAuthRepository {
    async fn create(&self, identity: &Identity) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO identities (
                identity_id,
                display_name,
                email,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(identity.identity_id.as_uuid())
        .bind(identity.display_name.as_str())
        .bind(identity.email.as_str())
        .bind(identity.password.as_phc_string())
        .bind(identity.created_at)
        .bind(identity.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e
                && db.is_unique_violation()
            {
                return AuthError::EmailTaken;
            }
            AuthError::Database(e)
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT
                identity_id,
                display_name,
                email,
                password_hash,
                created_at,
                updated_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(IdentityRow::into_identity))
    }

    async fn find_by_id(&self, identity_id: &IdentityId) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT
                identity_id,
                display_name,
                email,
                password_hash,
                created_at,
                updated_at
            FROM identities
            WHERE identity_id = $1
            "#,
        )
        .bind(identity_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(IdentityRow::into_identity))
    }
}

// ============================================================================
// Refresh Session Repository Implementation
// ============================================================================

const INSERT_SESSION: &str = r#"
    INSERT INTO refresh_sessions (
        refresh_session_id,
        identity_id,
        fingerprint,
        user_agent,
        client_address,
        expires_at,
        created_at,
        revoked
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#;

impl RefreshSessionRepository for PgAuthRepository {
    async fn create_session(&self, session: &RefreshSession) -> AuthResult<()> {
        sqlx::query(INSERT_SESSION)
            .bind(session.session_id.as_uuid())
            .bind(session.identity_id.as_uuid())
            .bind(session.fingerprint.as_str())
            .bind(session.user_agent.as_deref())
            .bind(session.client_address.as_deref())
            .bind(session.expires_at)
            .bind(session.created_at)
            .bind(session.revoked)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_active_by_fingerprint(
        &self,
        fingerprint: &SecretFingerprint,
    ) -> AuthResult<IdentityId> {
        let identity_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT identity_id
            FROM refresh_sessions
            WHERE fingerprint = $1
              AND revoked = FALSE
              AND expires_at > now()
            LIMIT 1
            "#,
        )
        .bind(fingerprint.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::SessionNotFound)?;

        Ok(IdentityId::from_uuid(identity_id))
    }

    async fn revoke(&self, fingerprint: &SecretFingerprint) -> AuthResult<()> {
        let revoked = sqlx::query(
            "UPDATE refresh_sessions SET revoked = TRUE WHERE fingerprint = $1 AND revoked = FALSE",
        )
        .bind(fingerprint.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::debug!(sessions_revoked = revoked, "Refresh session revoke");

        Ok(())
    }

    async fn rotate(
        &self,
        consumed: &SecretFingerprint,
        replacement: &RefreshSession,
    ) -> AuthResult<IdentityId> {
        let mut tx = self.pool.begin().await?;

        // The conditional update is the serialization point: a concurrent
        // rotation of the same row blocks on the row lock, then re-checks
        // `revoked = FALSE` and matches nothing.
        let owners = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE refresh_sessions
            SET revoked = TRUE
            WHERE fingerprint = $1
              AND revoked = FALSE
              AND expires_at > now()
            RETURNING identity_id
            "#,
        )
        .bind(consumed.as_str())
        .fetch_all(&mut *tx)
        .await?;

        let expected = replacement.identity_id.as_uuid();
        if owners.is_empty() || owners.iter().any(|owner| owner != expected) {
            tx.rollback().await?;
            return Err(AuthError::SessionNotFound);
        }

        sqlx::query(INSERT_SESSION)
            .bind(replacement.session_id.as_uuid())
            .bind(replacement.identity_id.as_uuid())
            .bind(replacement.fingerprint.as_str())
            .bind(replacement.user_agent.as_deref())
            .bind(replacement.client_address.as_deref())
            .bind(replacement.expires_at)
            .bind(replacement.created_at)
            .bind(replacement.revoked)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(replacement.identity_id)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct IdentityRow {
    identity_id: Uuid,
    display_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl IdentityRow {
    fn into_identity(self) -> Identity {
        Identity {
            identity_id: IdentityId::from_uuid(self.identity_id),
            display_name: DisplayName::from_db(self.display_name),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
