//! Session extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejectionReason,
    TypedHeader,
};

use domain::models::Session;

use crate::app::AppState;
use crate::error::ApiError;

/// The caller's session, rebuilt from the bearer token.
///
/// A request without an `Authorization` header is anonymous. A token that
/// fails verification is rejected rather than silently downgraded. The
/// users table is not consulted; the token's expiry is the only check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<CurrentSession>() {
            return Ok(session.clone());
        }

        let bearer =
            match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
                Ok(TypedHeader(Authorization(bearer))) => bearer,
                Err(rejection)
                    if matches!(rejection.reason(), TypedHeaderRejectionReason::Missing) =>
                {
                    return Ok(CurrentSession(Session::Anonymous));
                }
                Err(_) => {
                    return Err(ApiError::Unauthorized(
                        "Invalid Authorization header format".to_string(),
                    ))
                }
            };

        let tokens = state
            .tokens
            .as_deref()
            .ok_or_else(|| ApiError::Unauthorized("Sessions are not enabled".to_string()))?;
        let claims = tokens.verify(bearer.token())?;

        Ok(CurrentSession(Session::Anonymous.login(claims.sub)))
    }
}
