//! Section handlers for both news sections and rule sections.
//!
//! The admin routes are mounted once per [`SectionScope`], passed in as a
//! request extension.

use axum::{extract::State, Extension, Json};
use tracing::info;
use validator::Validate;

use domain::models::{
    sort_sections, CreateSectionRequest, CreatedId, IdRequest, Section, SectionScope,
    SuccessResponse, UpdateSectionRequest,
};
use persistence::entities::{NewSectionRow, SectionPatch};
use persistence::repositories::SectionRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;

fn repository(state: &AppState, scope: SectionScope) -> SectionRepository {
    SectionRepository::new(state.databases.main.clone(), scope)
}

async fn insert_section(
    state: &AppState,
    scope: SectionScope,
    request: CreateSectionRequest,
) -> Result<Section, ApiError> {
    request.validate()?;

    let row = NewSectionRow {
        id: None,
        order_index: request.order_index_or_default(),
        title: request.title,
        description: request.description,
        icon: request.icon,
        created_by: request.created_by,
    };

    let created = repository(state, scope).create(&row).await?;
    info!(section_id = created.id, %scope, "Section created");
    Ok(created.into())
}

async fn patch_section(
    state: &AppState,
    scope: SectionScope,
    request: UpdateSectionRequest,
) -> Result<Section, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::no_fields_to_update());
    }

    let patch = SectionPatch {
        title: request.title,
        description: request.description,
        icon: request.icon,
        order_index: request.order_index,
    };

    let updated = repository(state, scope)
        .update(request.id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Section not found".to_string()))?;

    info!(section_id = request.id, %scope, "Section updated");
    Ok(updated.into())
}

async fn load_sections(state: &AppState, scope: SectionScope) -> Result<Vec<Section>, ApiError> {
    let mut sections: Vec<Section> = repository(state, scope)
        .list()
        .await?
        .into_iter()
        .map(Section::from)
        .collect();
    sort_sections(&mut sections);
    Ok(sections)
}

/// `POST /api/section-create`: answers with the generated id only.
pub async fn create_section(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSectionRequest>,
) -> Result<Json<CreatedId>, ApiError> {
    let section = insert_section(&state, SectionScope::News, request).await?;
    Ok(Json(CreatedId { id: section.id }))
}

/// `PUT /api/section-update`
pub async fn update_section(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateSectionRequest>,
) -> Result<Json<Section>, ApiError> {
    Ok(Json(patch_section(&state, SectionScope::News, request).await?))
}

/// `GET /api/public/news/sections`
pub async fn list_news_sections(
    State(state): State<AppState>,
) -> Result<Json<Vec<Section>>, ApiError> {
    Ok(Json(load_sections(&state, SectionScope::News).await?))
}

pub async fn list_sections(
    State(state): State<AppState>,
    Extension(scope): Extension<SectionScope>,
) -> Result<Json<Vec<Section>>, ApiError> {
    Ok(Json(load_sections(&state, scope).await?))
}

pub async fn create_admin_section(
    State(state): State<AppState>,
    Extension(scope): Extension<SectionScope>,
    ApiJson(request): ApiJson<CreateSectionRequest>,
) -> Result<Json<Section>, ApiError> {
    Ok(Json(insert_section(&state, scope, request).await?))
}

pub async fn update_admin_section(
    State(state): State<AppState>,
    Extension(scope): Extension<SectionScope>,
    ApiJson(request): ApiJson<UpdateSectionRequest>,
) -> Result<Json<Section>, ApiError> {
    Ok(Json(patch_section(&state, scope, request).await?))
}

/// Items that pointed at the section keep their dangling `section_id`.
pub async fn delete_section(
    State(state): State<AppState>,
    Extension(scope): Extension<SectionScope>,
    ApiJson(request): ApiJson<IdRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let deleted = repository(&state, scope).delete(request.id).await?;
    info!(section_id = request.id, %scope, deleted, "Section deleted");
    Ok(Json(SuccessResponse::ok()))
}
