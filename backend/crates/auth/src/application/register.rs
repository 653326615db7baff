//! Register Use Case
//!
//! Creates a new identity.

use std::sync::Arc;

use platform::password::CredentialHasher;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{
    IdentityId,
    display_name::DisplayName,
    email::Email,
    password::{RawPassword, UserPassword},
};
use crate::error::AuthResult;

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub identity_id: IdentityId,
}

/// Register use case
pub struct RegisterUseCase<I>
where
    I: IdentityRepository,
{
    identity_repo: Arc<I>,
    hasher: Arc<CredentialHasher>,
}

impl<I> RegisterUseCase<I>
where
    I: IdentityRepository,
{
    pub fn new(identity_repo: Arc<I>, hasher: Arc<CredentialHasher>) -> Self {
        Self {
            identity_repo,
            hasher,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let display_name = DisplayName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let password = UserPassword::from_raw(&self.hasher, &raw_password)?;
        let identity = Identity::new(display_name, email, password);

        // Uniqueness is enforced by the store, not by a prior lookup
        self.identity_repo.create(&identity).await?;

        tracing::info!(identity_id = %identity.identity_id, "Identity registered");

        Ok(RegisterOutput {
            identity_id: identity.identity_id,
        })
    }
}
