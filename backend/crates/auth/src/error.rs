//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Every variant folds into one of the four
//! caller-visible kinds; token, storage and hashing detail never leaves the
//! crate.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Caller input rejected (message is safe to show)
    #[error("{0}")]
    Validation(String),

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Access token could not be decoded
    #[error("Malformed access token")]
    TokenMalformed,

    /// Access token decoded but failed signature, algorithm or expiry checks
    #[error("Invalid access token")]
    TokenInvalid,

    /// No active refresh session for the presented secret
    #[error("Refresh session not found or no longer active")]
    SessionNotFound,

    /// Missing or malformed Authorization header
    #[error("Missing bearer credential")]
    Unauthenticated,

    /// Credential hasher failure
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Invalid secret, TTL or cost configuration
    #[error("Invalid auth configuration: {0}")]
    Configuration(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::Validation,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::TokenMalformed
            | AuthError::TokenInvalid
            | AuthError::SessionNotFound
            | AuthError::Unauthenticated => ErrorKind::Authentication,
            AuthError::Hashing(_)
            | AuthError::Configuration(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to the caller-visible AppError
    ///
    /// Only validation messages pass through; everything else gets the fixed
    /// message of its kind.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(msg) => AppError::validation(msg.clone()),
            AuthError::EmailTaken => AppError::conflict("Email already registered"),
            AuthError::InvalidCredentials => AppError::authentication("Invalid email or password"),
            AuthError::SessionNotFound => AppError::authentication("Invalid refresh token")
                .with_action("Sign in again"),
            AuthError::TokenMalformed | AuthError::TokenInvalid | AuthError::Unauthenticated => {
                AppError::authentication("Invalid or missing access token")
            }
            AuthError::Hashing(_)
            | AuthError::Configuration(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => AppError::internal("Internal server error"),
        }
    }

    /// Log the error with appropriate level
    ///
    /// Server-side faults go out at error level with their detail; rejected
    /// credentials at warn; everything else at debug.
    pub(crate) fn log(&self) {
        if self.kind().is_server_error() {
            tracing::error!(error = %self, "Auth server error");
            return;
        }

        match self {
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::SessionNotFound => {
                tracing::warn!("Refresh with unknown, revoked or expired session");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Access token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::InvalidCost(msg) => AuthError::Configuration(msg),
            other => AuthError::Hashing(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AuthError::EmailTaken, StatusCode::CONFLICT),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::TokenMalformed, StatusCode::UNAUTHORIZED),
            (AuthError::TokenInvalid, StatusCode::UNAUTHORIZED),
            (AuthError::SessionNotFound, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                AuthError::Hashing("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Configuration("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let err = AuthError::Database(sqlx::Error::Protocol("relation missing".into()));
        let app = err.to_app_error();
        assert!(!app.message().contains("relation"));

        let err = AuthError::Hashing("argon2 params".into());
        assert!(!err.to_app_error().message().contains("argon2"));
    }

    #[test]
    fn test_login_failures_share_message() {
        let a = AuthError::InvalidCredentials.to_app_error();
        assert_eq!(a.kind(), ErrorKind::Authentication);
        assert_eq!(a.message(), "Invalid email or password");
    }

    #[test]
    fn test_validation_message_passes_through() {
        let app = AuthError::Validation("Email must contain '@'".into()).to_app_error();
        assert_eq!(app.message(), "Email must contain '@'");
    }

    #[test]
    fn test_only_infrastructure_faults_are_server_errors() {
        assert!(AuthError::Database(sqlx::Error::RowNotFound).kind().is_server_error());
        assert!(AuthError::Hashing("x".into()).kind().is_server_error());
        assert!(!AuthError::SessionNotFound.kind().is_server_error());
        assert!(!AuthError::Validation("x".into()).kind().is_server_error());
    }

    #[test]
    fn test_policy_error_is_validation() {
        let err: AuthError = PasswordPolicyError::TooShort { min: 6, actual: 2 }.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
