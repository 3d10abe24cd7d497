//! Admin session guard.
//!
//! The guard checks authentication only. The `can_manage_*` flags stored on
//! each user are not consulted here: sessions are rehydrated from the token
//! without a users-table lookup, so any logged-in staff member passes.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::middleware::trace_id::get_request_id;

/// Rejects requests that do not carry a valid session token.
///
/// Only mounted when `auth.enforce_admin_session` is set, and only around
/// the methods a route serves. The resolved
/// [`CurrentSession`] is left in the request extensions for handlers.
pub async fn require_session(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();
    let session = CurrentSession::from_request_parts(&mut parts, &state).await?;

    if !session.0.is_authenticated() {
        tracing::warn!(
            request_id = %get_request_id(&parts.extensions),
            path = %parts.uri.path(),
            "Rejected request without admin session"
        );
        return Err(ApiError::Unauthorized("Login required".into()));
    }

    parts.extensions.insert(session);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
