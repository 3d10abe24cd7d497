//! Staff login and session endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use validator::Validate;

use domain::models::{LoginRequest, LoginResponse, Session, SessionResponse};
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, CurrentSession};
use crate::services::{AuthError, AuthService};

/// Body of a refused login: `{ "success": false, "error": "..." }`.
#[derive(Debug, Serialize)]
struct LoginFailure {
    success: bool,
    error: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::InvalidCredentials | AuthError::SessionsDisabled => (
                StatusCode::UNAUTHORIZED,
                Json(LoginFailure {
                    success: false,
                    error: self.to_string(),
                }),
            )
                .into_response(),
            AuthError::TokenError(e) => ApiError::from(e).into_response(),
            AuthError::PasswordError(e) => ApiError::from(e).into_response(),
            AuthError::DataError(e) => ApiError::from(e).into_response(),
        }
    }
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, Response> {
    request
        .validate()
        .map_err(|e| ApiError::from(e).into_response())?;

    let service = AuthService::new(
        UserRepository::new(state.databases.main.clone()),
        state.tokens.as_deref(),
    );
    let result = service
        .login(&request.username, &request.password)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(result.into_response()))
}

/// `POST /api/auth/logout`. Tokens are stateless; the client drops its copy.
pub async fn logout() -> Json<SessionResponse> {
    Json(Session::Anonymous.to_response())
}

/// `GET /api/auth/session`
pub async fn session(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    Json(session.to_response())
}
