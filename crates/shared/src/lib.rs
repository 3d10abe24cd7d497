//! Shared utilities for the Realm Portal backend.
//!
//! - Password hashing with Argon2id
//! - Session token signing
//! - Request field validators

pub mod jwt;
pub mod password;
pub mod validation;
