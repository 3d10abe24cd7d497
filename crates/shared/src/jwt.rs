//! Session tokens signed with HS256.
//!
//! A token stands in for the browser-side "logged in as" record: it carries
//! the username and an expiry, nothing else. Holding a valid token is the
//! whole session; there is no server-side session table.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Failed to decode token: {0}")]
    Decoding(String),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Signing secret must not be empty")]
    EmptySecret,
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Username of the staff member.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Default clock-skew tolerance in seconds.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    pub expiry_secs: i64,
    pub leeway_secs: u64,
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("expiry_secs", &self.expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl SessionTokens {
    pub fn new(secret: &str, expiry_secs: i64) -> Result<Self, JwtError> {
        Self::with_leeway(secret, expiry_secs, DEFAULT_LEEWAY_SECS)
    }

    pub fn with_leeway(secret: &str, expiry_secs: i64, leeway_secs: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
            leeway_secs,
        })
    }

    /// Issues a token for `username`. Returns the encoded token and its expiry (unix seconds).
    pub fn issue(&self, username: &str) -> Result<(String, i64), JwtError> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(self.expiry_secs)).timestamp();

        let claims = SessionClaims {
            sub: username.to_string(),
            exp,
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Encoding(e.to_string()))?;

        Ok((token, exp))
    }

    /// Decodes and checks a token, returning its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::Invalid,
                _ => JwtError::Decoding(e.to_string()),
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(JwtError::Invalid);
        }

        Ok(data.claims)
    }
}
