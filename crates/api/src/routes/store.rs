//! Store section and package handlers, and the public storefront.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use domain::models::{
    CreatePackageRequest, CreateStoreSectionRequest, IdRequest, Package, StoreSection, Storefront,
    SuccessResponse, UpdatePackageRequest, UpdateStoreSectionRequest,
};
use domain::services::ContentQuery;
use persistence::entities::{NewPackageRow, NewStoreSectionRow, PackagePatch, StoreSectionPatch};
use persistence::repositories::{PackageRepository, StoreSectionRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::services::storefront::load_storefront;

/// `GET /api/public/store?search=&section=`
pub async fn storefront(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Storefront>, ApiError> {
    let filter = query.to_filter()?;
    Ok(Json(load_storefront(&state.databases, &filter, Utc::now()).await?))
}

pub async fn list_store_sections(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoreSection>>, ApiError> {
    let mut sections: Vec<StoreSection> = StoreSectionRepository::new(state.databases.other.clone())
        .list()
        .await?
        .into_iter()
        .map(StoreSection::from)
        .collect();
    sections.sort_by(|a, b| a.order_index.cmp(&b.order_index).then(a.id.cmp(&b.id)));
    Ok(Json(sections))
}

pub async fn create_store_section(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateStoreSectionRequest>,
) -> Result<Json<StoreSection>, ApiError> {
    request.validate()?;

    let row = NewStoreSectionRow {
        nome: request.nome,
        descrizione: request.descrizione,
        order_index: request.order_index.unwrap_or(0),
    };

    let created = StoreSectionRepository::new(state.databases.other.clone())
        .create(&row)
        .await?;

    info!(store_section_id = created.id, "Store section created");
    Ok(Json(created.into()))
}

pub async fn update_store_section(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateStoreSectionRequest>,
) -> Result<Json<StoreSection>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::no_fields_to_update());
    }

    let patch = StoreSectionPatch {
        nome: request.nome,
        descrizione: request.descrizione,
        order_index: request.order_index,
    };

    let updated = StoreSectionRepository::new(state.databases.other.clone())
        .update(request.id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Store section not found".to_string()))?;

    info!(store_section_id = request.id, "Store section updated");
    Ok(Json(updated.into()))
}

/// Packages in the section keep their `section_id` and fall into the
/// storefront's unassigned group.
pub async fn delete_store_section(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IdRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let deleted = StoreSectionRepository::new(state.databases.other.clone())
        .delete(request.id)
        .await?;

    info!(store_section_id = request.id, deleted, "Store section deleted");
    Ok(Json(SuccessResponse::ok()))
}

pub async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<Package>>, ApiError> {
    let packages = PackageRepository::new(state.databases.other.clone())
        .list()
        .await?
        .into_iter()
        .map(Package::from)
        .collect();
    Ok(Json(packages))
}

pub async fn create_package(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreatePackageRequest>,
) -> Result<Json<Package>, ApiError> {
    request.validate()?;

    let row = NewPackageRow {
        nome: request.nome,
        descrizione: request.descrizione,
        immagine: request.immagine,
        prezzo: request.prezzo,
        section_id: request.section_id,
    };

    let created = PackageRepository::new(state.databases.other.clone())
        .create(&row)
        .await?;

    info!(package_id = created.id, prezzo = created.prezzo, "Package created");
    Ok(Json(created.into()))
}

pub async fn update_package(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdatePackageRequest>,
) -> Result<Json<Package>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::no_fields_to_update());
    }

    let patch = PackagePatch {
        nome: request.nome,
        descrizione: request.descrizione,
        immagine: request.immagine,
        prezzo: request.prezzo,
        section_id: request.section_id,
    };

    let updated = PackageRepository::new(state.databases.other.clone())
        .update(request.id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Package not found".to_string()))?;

    info!(package_id = request.id, "Package updated");
    Ok(Json(updated.into()))
}

pub async fn delete_package(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IdRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let deleted = PackageRepository::new(state.databases.other.clone())
        .delete(request.id)
        .await?;

    info!(package_id = request.id, deleted, "Package deleted");
    Ok(Json(SuccessResponse::ok()))
}
