//! Staff user handlers.
//!
//! Passwords are hashed before they reach the backend and hashes are never
//! returned.

use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

use domain::models::{CreateUserRequest, IdRequest, SuccessResponse, UpdateUserRequest, User};
use persistence::entities::{NewUserRow, UserPatch};
use persistence::repositories::UserRepository;
use shared::password::hash_password;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;

/// `DELETE /api/user-delete`
pub async fn delete_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IdRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let deleted = UserRepository::new(state.databases.main.clone())
        .delete(request.id)
        .await?;

    info!(user_id = request.id, deleted, "User deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// `PUT /api/user-update`
pub async fn update_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::no_fields_to_update());
    }

    let password = request
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    let patch = UserPatch {
        username: request.username,
        password,
        permissions: request.permissions.map(Into::into),
    };

    UserRepository::new(state.databases.main.clone())
        .update(request.id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    info!(
        user_id = request.id,
        password_changed = patch.password.is_some(),
        "User updated"
    );
    Ok(Json(SuccessResponse::ok()))
}

/// `GET /api/admin/users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepository::new(state.databases.main.clone())
        .list()
        .await?
        .into_iter()
        .map(User::from)
        .collect();
    Ok(Json(users))
}

/// `POST /api/admin/users`
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    request.validate()?;

    let row = NewUserRow {
        password: hash_password(&request.password)?,
        username: request.username,
        permissions: request.permissions.into(),
    };

    let created = UserRepository::new(state.databases.main.clone())
        .create(&row)
        .await?;

    info!(user_id = created.id, username = %created.username, "User created");
    Ok(Json(created.into()))
}
