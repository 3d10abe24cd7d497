//! News posts shown on the public news page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_image_ref, validate_patch_value};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: i64,
    pub section_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub order_index: i32,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/news-create` (and `POST /api/news`).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub section_id: i64,

    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 200, message = "Title must be at most 200 characters")
    )]
    pub title: String,

    pub content: String,

    pub order_index: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_image_ref"))]
    pub image: Option<String>,

    pub created_by: Option<String>,
}

/// Body of `PUT /api/news-update` (and `PUT /api/news`).
///
/// Only the fields present in the body are written; everything else on the
/// row stays as it was.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_news_patch"))]
pub struct UpdateNewsRequest {
    pub id: i64,

    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 200, message = "Title must be at most 200 characters")
    )]
    pub title: Option<String>,

    pub content: Option<String>,

    pub order_index: Option<i32>,

    pub section_id: Option<i64>,

    #[serde(default, deserialize_with = "crate::models::deserialize_some")]
    pub image: Option<Option<String>>,
}

fn validate_news_patch(request: &UpdateNewsRequest) -> Result<(), ValidationError> {
    validate_patch_value(&request.image, validate_image_ref)
}

impl UpdateNewsRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.order_index.is_none()
            && self.section_id.is_none()
            && self.image.is_none()
    }
}

/// Public ordering: highest `order_index` first, newest first within a position.
pub fn sort_news_for_display(news: &mut [News]) {
    news.sort_by(|a, b| {
        b.order_index
            .cmp(&a.order_index)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
