//! Credential hashing for portal staff accounts.
//!
//! Stored passwords are Argon2id PHC strings. Rows that still hold a
//! legacy plaintext value are detected with [`is_password_hash`] and never
//! verified against.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Failed to verify password: {0}")]
    Verify(String),

    #[error("Stored credential is not a password hash")]
    NotAHash,
}

// OWASP baseline for Argon2id: 19 MiB, 2 passes, 1 lane.
const MEMORY_COST_KIB: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

const PHC_PREFIX: &str = "$argon2";

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::Hash(format!("invalid Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password into a salted PHC string suitable for the `users.password` column.
///
/// ```
/// use shared::password::hash_password;
///
/// let stored = hash_password("creeper").unwrap();
/// assert!(stored.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Returns true when the stored value looks like an Argon2 PHC string.
pub fn is_password_hash(stored: &str) -> bool {
    stored.starts_with(PHC_PREFIX) && PasswordHash::new(stored).is_ok()
}

/// Checks a candidate password against a stored PHC string.
///
/// A stored value that is not a hash yields [`PasswordError::NotAHash`]
/// rather than falling back to a plaintext comparison.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    if !stored.starts_with(PHC_PREFIX) {
        return Err(PasswordError::NotAHash);
    }
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::NotAHash)?;

    // Parameters are read back from the PHC string.
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e.to_string())),
    }
}
