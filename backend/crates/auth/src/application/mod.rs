//! Application Layer
//!
//! Use cases and application services.

pub mod check_access;
pub mod config;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod token_signer;

// Re-exports
pub use check_access::{AuthenticatedIdentity, CheckAccessUseCase};
pub use config::AuthConfig;
pub use login::{AuthTokens, LoginInput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use me::{MeOutput, MeUseCase};
pub use refresh::RefreshUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token_signer::TokenSigner;
