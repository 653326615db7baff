//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use platform::password::CredentialHasher;
use std::sync::Arc;

use crate::application::{config::AuthConfig, token_signer::TokenSigner};
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::error::AuthResult;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_access;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> AuthResult<Router> {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
///
/// Fails if the signing secret, token lifetimes or hash cost are invalid.
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> AuthResult<Router>
where
    R: IdentityRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let signer = Arc::new(TokenSigner::new(&config)?);
    let hasher = Arc::new(CredentialHasher::new(
        config.password_hash_cost,
        config.password_pepper.clone(),
    )?);

    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        signer: signer.clone(),
        hasher,
    };

    let protected = Router::new()
        .route("/me", get(handlers::me::<R>))
        .route_layer(from_fn_with_state(signer, require_access));

    Ok(Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .merge(protected)
        .with_state(state))
}
