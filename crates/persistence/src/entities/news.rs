//! News entity (row of `news` in the main database).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain::models::News;

#[derive(Debug, Clone, Deserialize)]
pub struct NewsEntity {
    pub id: i64,
    pub section_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub order_index: Option<i32>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<NewsEntity> for News {
    fn from(entity: NewsEntity) -> Self {
        Self {
            id: entity.id,
            section_id: entity.section_id,
            title: entity.title,
            content: entity.content,
            image: entity.image,
            order_index: entity.order_index.unwrap_or(0),
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewNewsRow {
    pub section_id: i64,
    pub title: String,
    pub content: String,
    pub order_index: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Only the present fields end up in the PATCH body; `updated_at` is always set.
#[derive(Debug, Clone, Serialize)]
pub struct NewsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}
