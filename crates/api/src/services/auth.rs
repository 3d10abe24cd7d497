//! Staff login against the `users` table.

use chrono::{DateTime, Utc};
use shared::jwt::{JwtError, SessionTokens};
use shared::password::{verify_password, PasswordError};
use thiserror::Error;
use tracing::{info, warn};

use domain::models::{LoginResponse, Session};
use persistence::repositories::UserRepository;
use persistence::DataError;

/// Errors that can occur during login.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Login is not available: no session secret configured")]
    SessionsDisabled,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error("Backend error: {0}")]
    DataError(#[from] DataError),
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub session: Session,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthResult {
    pub fn into_response(self) -> LoginResponse {
        LoginResponse {
            success: true,
            username: self.session.username().unwrap_or_default().to_string(),
            token: self.token,
            expires_at: self.expires_at,
        }
    }
}

pub struct AuthService<'a> {
    users: UserRepository,
    tokens: Option<&'a SessionTokens>,
}

impl<'a> AuthService<'a> {
    pub fn new(users: UserRepository, tokens: Option<&'a SessionTokens>) -> Self {
        Self { users, tokens }
    }

    /// Checks `password` for `username` with a single lookup and issues a
    /// session token.
    ///
    /// Stored values that are not password hashes never match.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResult, AuthError> {
        let tokens = self.tokens.ok_or(AuthError::SessionsDisabled)?;

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let stored = user.password.as_deref().ok_or(AuthError::InvalidCredentials)?;
        match verify_password(password, stored) {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::InvalidCredentials),
            Err(PasswordError::NotAHash) => {
                warn!(
                    user_id = user.id,
                    "Stored password is not a hash; reset it through user-update"
                );
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::PasswordError(e)),
        }

        let (token, exp) = tokens.issue(&user.username)?;
        let expires_at = DateTime::<Utc>::from_timestamp(exp, 0)
            .ok_or_else(|| JwtError::Encoding(format!("expiry out of range: {}", exp)))?;

        info!(user_id = user.id, "Staff login");
        Ok(AuthResult {
            session: Session::Anonymous.login(user.username),
            token,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::db::create_memory_databases;
    use serde_json::json;
    use shared::password::hash_password;

    fn tokens() -> SessionTokens {
        SessionTokens::new("unit-test-secret", 600).unwrap()
    }

    fn seeded_users() -> UserRepository {
        let (databases, main, _) = create_memory_databases();
        main.seed(
            "users",
            vec![
                json!({"id": 1, "username": "steve", "password": hash_password("diamond_pick").unwrap()}),
                json!({"id": 2, "username": "alex", "password": "plaintext-legacy"}),
            ],
        );
        UserRepository::new(databases.main)
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let tokens = tokens();
        let service = AuthService::new(seeded_users(), Some(&tokens));

        let result = service.login("steve", "diamond_pick").await.unwrap();
        assert_eq!(result.session.username(), Some("steve"));
        assert_eq!(tokens.verify(&result.token).unwrap().sub, "steve");

        let response = result.into_response();
        assert!(response.success);
        assert_eq!(response.username, "steve");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let tokens = tokens();
        let service = AuthService::new(seeded_users(), Some(&tokens));
        let err = service.login("steve", "wooden_pick").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let tokens = tokens();
        let service = AuthService::new(seeded_users(), Some(&tokens));
        let err = service.login("herobrine", "whatever").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_plaintext_password_never_authenticates() {
        let tokens = tokens();
        let service = AuthService::new(seeded_users(), Some(&tokens));
        let err = service.login("alex", "plaintext-legacy").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_without_secret() {
        let service = AuthService::new(seeded_users(), None);
        let err = service.login("steve", "diamond_pick").await.unwrap_err();
        assert!(matches!(err, AuthError::SessionsDisabled));
    }
}
