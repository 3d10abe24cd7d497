//! Discount handlers.

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use domain::models::{
    CreateDiscountRequest, Discount, IdRequest, SuccessResponse, UpdateDiscountRequest,
};
use persistence::entities::{DiscountPatch, NewDiscountRow};
use persistence::repositories::DiscountRepository;
use persistence::DataError;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::services::storefront::load_active_discounts;

/// `GET /api/public/discounts/active`
pub async fn active_discounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Discount>>, ApiError> {
    Ok(Json(load_active_discounts(&state.databases, Utc::now()).await?))
}

/// Every discount, newest first, expired ones included.
pub async fn list_discounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Discount>>, ApiError> {
    let discounts = DiscountRepository::new(state.databases.other.clone())
        .list()
        .await?
        .into_iter()
        .map(Discount::try_from)
        .collect::<Result<Vec<_>, DataError>>()?;
    Ok(Json(discounts))
}

pub async fn create_discount(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateDiscountRequest>,
) -> Result<Json<Discount>, ApiError> {
    request.validate()?;

    let row = NewDiscountRow {
        product_id: request.product_id,
        percentage: request.percentage,
        expires_at: request.expires_at,
    };

    let created = DiscountRepository::new(state.databases.other.clone())
        .create(&row)
        .await?;

    info!(
        discount_id = created.id,
        product_id = row.product_id,
        percentage = row.percentage,
        "Discount created"
    );
    Ok(Json(Discount::try_from(created)?))
}

pub async fn update_discount(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateDiscountRequest>,
) -> Result<Json<Discount>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::no_fields_to_update());
    }

    let patch = DiscountPatch {
        product_id: request.product_id,
        percentage: request.percentage,
        expires_at: request.expires_at,
    };

    let updated = DiscountRepository::new(state.databases.other.clone())
        .update(request.id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Discount not found".to_string()))?;

    info!(discount_id = request.id, "Discount updated");
    Ok(Json(Discount::try_from(updated)?))
}

pub async fn delete_discount(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IdRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let deleted = DiscountRepository::new(state.databases.other.clone())
        .delete(request.id)
        .await?;

    info!(discount_id = request.id, deleted, "Discount deleted");
    Ok(Json(SuccessResponse::ok()))
}
