//! Me Use Case
//!
//! Profile of the authenticated identity.

use std::sync::Arc;

use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::IdentityId;
use crate::error::{AuthError, AuthResult};

/// Me output
pub struct MeOutput {
    pub identity_id: IdentityId,
    pub name: String,
    pub email: String,
}

/// Me use case
pub struct MeUseCase<I>
where
    I: IdentityRepository,
{
    identity_repo: Arc<I>,
}

impl<I> MeUseCase<I>
where
    I: IdentityRepository,
{
    pub fn new(identity_repo: Arc<I>) -> Self {
        Self { identity_repo }
    }

    /// A valid token for an identity that no longer exists is treated as an
    /// invalid token.
    pub async fn execute(&self, identity_id: IdentityId) -> AuthResult<MeOutput> {
        let identity = self
            .identity_repo
            .find_by_id(&identity_id)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        Ok(MeOutput {
            identity_id: identity.identity_id,
            name: identity.display_name.as_str().to_string(),
            email: identity.email.into_db(),
        })
    }
}
