//! News handlers.
//!
//! `/api/news-create` and `/api/news-update` answer with the written row;
//! the combined `/api/news` endpoint only acknowledges.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use domain::models::{
    sort_news_for_display, CreateNewsRequest, IdRequest, News, SuccessResponse, UpdateNewsRequest,
};
use domain::services::{filter_items, ContentQuery};
use persistence::entities::{NewNewsRow, NewsPatch};
use persistence::repositories::NewsRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;

async fn insert_news(state: &AppState, request: CreateNewsRequest) -> Result<News, ApiError> {
    request.validate()?;

    let row = NewNewsRow {
        section_id: request.section_id,
        title: request.title,
        content: request.content,
        order_index: request.order_index.unwrap_or(0),
        image: request.image,
        created_by: request.created_by,
    };

    let created = NewsRepository::new(state.databases.main.clone())
        .create(&row)
        .await?;

    info!(news_id = created.id, section_id = row.section_id, "News created");
    Ok(created.into())
}

async fn patch_news(state: &AppState, request: UpdateNewsRequest) -> Result<News, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::no_fields_to_update());
    }

    let id = request.id;
    let patch = NewsPatch {
        title: request.title,
        content: request.content,
        order_index: request.order_index,
        section_id: request.section_id,
        image: request.image,
        updated_at: Utc::now(),
    };

    let updated = NewsRepository::new(state.databases.main.clone())
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("News not found".to_string()))?;

    info!(news_id = id, "News updated");
    Ok(updated.into())
}

/// `POST /api/news-create`
pub async fn create_news(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateNewsRequest>,
) -> Result<Json<News>, ApiError> {
    Ok(Json(insert_news(&state, request).await?))
}

/// `PUT /api/news-update`
pub async fn update_news(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateNewsRequest>,
) -> Result<Json<News>, ApiError> {
    Ok(Json(patch_news(&state, request).await?))
}

/// `POST /api/news`
pub async fn create_news_ack(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateNewsRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    insert_news(&state, request).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// `PUT /api/news`
pub async fn update_news_ack(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateNewsRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    patch_news(&state, request).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// `DELETE /api/news`. Deleting a missing id still succeeds.
pub async fn delete_news(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IdRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let deleted = NewsRepository::new(state.databases.main.clone())
        .delete(request.id)
        .await?;

    info!(news_id = request.id, deleted, "News deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// `GET /api/public/news?search=&section=`
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<News>>, ApiError> {
    let filter = query.to_filter()?;

    let mut news: Vec<News> = NewsRepository::new(state.databases.main.clone())
        .list()
        .await?
        .into_iter()
        .map(News::from)
        .collect();
    sort_news_for_display(&mut news);

    Ok(Json(filter_items(news, &filter)))
}
