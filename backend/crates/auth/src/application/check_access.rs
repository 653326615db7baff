//! Check Access Use Case
//!
//! Resolves the identity behind an `Authorization: Bearer` header. Needs no
//! storage: access tokens are self-contained.

use std::sync::Arc;

use crate::application::token_signer::TokenSigner;
use crate::domain::value_object::IdentityId;
use crate::error::{AuthError, AuthResult};

/// Identity attached to a request that passed the access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub identity_id: IdentityId,
}

/// Check access use case
pub struct CheckAccessUseCase {
    signer: Arc<TokenSigner>,
}

impl CheckAccessUseCase {
    pub fn new(signer: Arc<TokenSigner>) -> Self {
        Self { signer }
    }

    /// Verify the raw `Authorization` header value
    ///
    /// `Unauthenticated` if absent or not a bearer credential; otherwise
    /// whatever token verification reports.
    pub fn execute(&self, authorization: Option<&str>) -> AuthResult<AuthenticatedIdentity> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthError::Unauthenticated)?;

        let identity_id = self.signer.verify_access(token)?;
        Ok(AuthenticatedIdentity { identity_id })
    }
}

/// Token part of `Bearer <token>`, scheme matched case-insensitively
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;

    fn use_case() -> (CheckAccessUseCase, Arc<TokenSigner>) {
        let signer = Arc::new(TokenSigner::new(&AuthConfig::development()).unwrap());
        (CheckAccessUseCase::new(signer.clone()), signer)
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("BEARER  abc "), Some("abc"));
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let (check, _) = use_case();
        assert!(matches!(check.execute(None), Err(AuthError::Unauthenticated)));
        assert!(matches!(
            check.execute(Some("Token abc")),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_valid_token_resolves_identity() {
        let (check, signer) = use_case();
        let id = IdentityId::new();
        let (token, _) = signer.issue_access(id).unwrap();

        let header = format!("Bearer {token}");
        assert_eq!(check.execute(Some(header.as_str())).unwrap().identity_id, id);
    }

    #[test]
    fn test_bad_token_is_rejected() {
        let (check, _) = use_case();
        assert!(matches!(
            check.execute(Some("Bearer garbage")),
            Err(AuthError::TokenMalformed)
        ));
    }
}
