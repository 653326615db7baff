//! Auth Middleware
//!
//! Access guard for protected routes. Verifies the bearer access token and
//! attaches [`AuthenticatedIdentity`] to the request before any protected
//! handler runs.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::{AuthenticatedIdentity, CheckAccessUseCase, TokenSigner};
use crate::error::AuthError;

/// Middleware that requires a valid access token
///
/// Install with `axum::middleware::from_fn_with_state(signer, require_access)`.
pub async fn require_access(
    State(signer): State<Arc<TokenSigner>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let identity = CheckAccessUseCase::new(signer).execute(authorization)?;

    tracing::debug!(identity_id = %identity.identity_id, "Access granted");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Typed access to the identity attached by [`require_access`]
///
/// Rejects with 401 on routes the guard does not cover.
impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}
