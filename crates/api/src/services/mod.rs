//! Operations that span several backend calls.

pub mod auth;
pub mod backup;
pub mod rules;
pub mod storefront;

pub use auth::{AuthError, AuthResult, AuthService};
