//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::{AuthTokens, MeOutput};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub id: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Refresh / Logout
// ============================================================================

/// Refresh or logout request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Token pair
// ============================================================================

/// Login and refresh response
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
}

impl From<AuthTokens> for AuthResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type.to_string(),
            expires_in: tokens.expires_in,
        }
    }
}

// ============================================================================
// Me
// ============================================================================

/// Profile of the authenticated identity
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<MeOutput> for MeResponse {
    fn from(output: MeOutput) -> Self {
        Self {
            id: output.identity_id.to_string(),
            name: output.name,
            email: output.email,
        }
    }
}

// ============================================================================
// Generic
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
