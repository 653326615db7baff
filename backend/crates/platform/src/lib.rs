//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no knowledge of the auth domain:
//! - Cryptographic utilities (CSPRNG, SHA-256, base64url)
//! - Credential hashing (Argon2id)
//! - Client metadata extraction from request headers

pub mod client;
pub mod crypto;
pub mod password;
