//! Site info handlers.

use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

use domain::models::{PublicSiteInfo, SiteInfo, UpdateSiteInfoRequest};
use persistence::entities::InfoUpsert;
use persistence::repositories::InfoRepository;
use persistence::DataError;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;

async fn load_info(state: &AppState) -> Result<SiteInfo, DataError> {
    let entity = InfoRepository::new(state.databases.main.clone()).get().await?;
    Ok(entity.map(SiteInfo::from).unwrap_or_default())
}

/// `GET /api/public/info`
///
/// Visitors see empty defaults while the row is missing or the database is
/// not configured.
pub async fn get_public_info(
    State(state): State<AppState>,
) -> Result<Json<PublicSiteInfo>, ApiError> {
    let info = match load_info(&state).await {
        Ok(info) => info,
        Err(DataError::NotConfigured) => SiteInfo::default(),
        Err(e) => return Err(e.into()),
    };

    Ok(Json(PublicSiteInfo {
        info,
        support_url: state.config.site.support_url.clone(),
    }))
}

pub async fn get_admin_info(State(state): State<AppState>) -> Result<Json<SiteInfo>, ApiError> {
    Ok(Json(load_info(&state).await?))
}

pub async fn update_info(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateSiteInfoRequest>,
) -> Result<Json<SiteInfo>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::no_fields_to_update());
    }

    let upserted = InfoRepository::new(state.databases.main.clone())
        .upsert(&InfoUpsert::from(request))
        .await?;

    info!("Site info updated");
    Ok(Json(upserted.into()))
}
