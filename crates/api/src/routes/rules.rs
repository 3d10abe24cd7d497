//! Rule handlers: admin management plus the public rule pages.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use domain::models::{
    sort_rules, CreateRuleRequest, IdRequest, Rule, SectionWithRules, SuccessResponse,
    UpdateRuleRequest,
};
use domain::services::{filter_items, ContentQuery};
use persistence::entities::{NewRuleRow, RulePatch};
use persistence::repositories::RuleRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::services::rules::{load_rules_for_section, load_sections_with_rules};

async fn all_rules(state: &AppState) -> Result<Vec<Rule>, ApiError> {
    let mut rules: Vec<Rule> = RuleRepository::new(state.databases.main.clone())
        .list()
        .await?
        .into_iter()
        .map(Rule::from)
        .collect();
    sort_rules(&mut rules);
    Ok(rules)
}

pub async fn list_rules(State(state): State<AppState>) -> Result<Json<Vec<Rule>>, ApiError> {
    Ok(Json(all_rules(&state).await?))
}

pub async fn create_rule(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRuleRequest>,
) -> Result<Json<Rule>, ApiError> {
    request.validate()?;

    let row = NewRuleRow {
        id: None,
        section_id: Some(request.section_id),
        title: request.title,
        content: request.content,
        order_index: request.order_index.unwrap_or(0),
        created_by: request.created_by,
    };

    let created = RuleRepository::new(state.databases.main.clone())
        .create(&row)
        .await?;

    info!(rule_id = created.id, section_id = request.section_id, "Rule created");
    Ok(Json(created.into()))
}

pub async fn update_rule(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateRuleRequest>,
) -> Result<Json<Rule>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::no_fields_to_update());
    }

    let patch = RulePatch {
        title: request.title,
        content: request.content,
        order_index: request.order_index,
        section_id: request.section_id,
        updated_at: Utc::now(),
    };

    let updated = RuleRepository::new(state.databases.main.clone())
        .update(request.id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Rule not found".to_string()))?;

    info!(rule_id = request.id, "Rule updated");
    Ok(Json(updated.into()))
}

pub async fn delete_rule(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IdRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let deleted = RuleRepository::new(state.databases.main.clone())
        .delete(request.id)
        .await?;

    info!(rule_id = request.id, deleted, "Rule deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// `GET /api/public/rules?search=&section=`
pub async fn list_public_rules(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<Rule>>, ApiError> {
    let filter = query.to_filter()?;
    Ok(Json(filter_items(all_rules(&state).await?, &filter)))
}

/// `GET /api/public/rules/grouped`
pub async fn grouped_rules(
    State(state): State<AppState>,
) -> Result<Json<Vec<SectionWithRules>>, ApiError> {
    Ok(Json(load_sections_with_rules(&state.databases).await?))
}

/// `GET /api/public/rules/sections/:section_id`
pub async fn rules_by_section(
    State(state): State<AppState>,
    Path(section_id): Path<i64>,
) -> Result<Json<Vec<Rule>>, ApiError> {
    Ok(Json(load_rules_for_section(&state.databases, section_id).await?))
}
