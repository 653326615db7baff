//! Value Object Module

pub mod display_name;
pub mod email;
pub mod password;
pub mod refresh_secret;

pub use kernel::id::{IdentityId, RefreshSessionId};
