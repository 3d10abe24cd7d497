//! Rule backup export and restore.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use domain::models::{Backup, RestoreReport, RestoreStatus};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::services::backup;

/// `GET /api/admin/backup`
pub async fn export_backup(State(state): State<AppState>) -> Result<Json<Backup>, ApiError> {
    Ok(Json(backup::export(&state.databases, Utc::now()).await?))
}

/// `POST /api/admin/backup/restore`
///
/// Answers 200 with the report when every step succeeded and 207 otherwise.
pub async fn restore_backup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Backup>,
) -> Result<(StatusCode, Json<RestoreReport>), ApiError> {
    let report = backup::restore(&state.databases, &payload).await?;
    let status = match report.status {
        RestoreStatus::Success => StatusCode::OK,
        _ => StatusCode::MULTI_STATUS,
    };
    Ok((status, Json(report)))
}
