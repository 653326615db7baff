//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::IntoResponse;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use platform::client::{ClientMetadata, extract_client_metadata};
use platform::password::CredentialHasher;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticatedIdentity, LoginInput, LoginUseCase, LogoutUseCase, MeUseCase, RefreshUseCase,
    RegisterInput, RegisterUseCase, TokenSigner,
};
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, LoginRequest, MeResponse, MessageResponse, RefreshTokenRequest, RegisterRequest,
    RegisterResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: IdentityRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub signer: Arc<TokenSigner>,
    pub hasher: Arc<CredentialHasher>,
}

/// Client metadata of the current request
///
/// Never rejects: absent headers just leave fields empty.
pub struct ClientInfo(pub ClientMetadata);

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        Ok(ClientInfo(extract_client_metadata(&parts.headers, direct_ip)))
    }
}

/// Every body problem is a 400 with the parser's explanation
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::Validation(rejection.body_text()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: IdentityRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let req = parse_body(payload)?;
    let use_case = RegisterUseCase::new(state.repo.clone(), state.hasher.clone());

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: output.identity_id.to_string(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ClientInfo(client): ClientInfo,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<AuthResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let req = parse_body(payload)?;
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.signer.clone(),
        state.config.clone(),
    );

    let tokens = use_case
        .execute(
            LoginInput {
                email: req.email,
                password: req.password,
            },
            client,
        )
        .await?;

    Ok(Json(tokens.into()))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    ClientInfo(client): ClientInfo,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AuthResult<Json<AuthResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let req = parse_body(payload)?;
    let use_case = RefreshUseCase::new(
        state.repo.clone(),
        state.signer.clone(),
        state.config.clone(),
    );

    let tokens = use_case.execute(req.refresh_token, client).await?;

    Ok(Json(tokens.into()))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let req = parse_body(payload)?;
    LogoutUseCase::new(state.repo.clone())
        .execute(req.refresh_token)
        .await?;

    Ok(Json(MessageResponse {
        message: "logged out",
    }))
}

// ============================================================================
// Me
// ============================================================================

/// GET /api/auth/me (requires access token)
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    identity: AuthenticatedIdentity,
) -> AuthResult<Json<MeResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let output = MeUseCase::new(state.repo.clone())
        .execute(identity.identity_id)
        .await?;

    Ok(Json(output.into()))
}
