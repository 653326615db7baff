//! Shared Kernel
//!
//! The smallest vocabulary shared by every crate in the workspace:
//! - the closed error classification and the boundary error type
//! - typed identifiers
//!
//! Only things whose meaning is identical across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
