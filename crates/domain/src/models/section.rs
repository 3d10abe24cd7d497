//! Sections group news posts and rules on the public pages.

use serde::{Deserialize, Serialize};
use shared::validation::{validate_description, validate_icon, validate_patch_value};
use validator::{Validate, ValidationError};

/// Which family of sections a row belongs to.
///
/// News sections and rule sections share one shape but live in separate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionScope {
    News,
    Rules,
}

impl SectionScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionScope::News => "news",
            SectionScope::Rules => "rules",
        }
    }
}

impl std::fmt::Display for SectionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order_index: i32,
    pub created_by: Option<String>,
}

/// Body of `POST /api/section-create`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 120, message = "Title must be at most 120 characters")
    )]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "shared::validation::validate_icon"))]
    pub icon: Option<String>,

    pub order_index: Option<i32>,

    pub created_by: Option<String>,
}

impl CreateSectionRequest {
    /// Sections created without an explicit position go first.
    pub fn order_index_or_default(&self) -> i32 {
        self.order_index.unwrap_or(0)
    }
}

/// Body of `PUT /api/section-update`. Absent fields are left untouched.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_section_patch"))]
pub struct UpdateSectionRequest {
    pub id: i64,

    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 120, message = "Title must be at most 120 characters")
    )]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "crate::models::deserialize_some")]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "crate::models::deserialize_some")]
    pub icon: Option<Option<String>>,

    pub order_index: Option<i32>,
}

fn validate_section_patch(request: &UpdateSectionRequest) -> Result<(), ValidationError> {
    validate_patch_value(&request.description, validate_description)?;
    validate_patch_value(&request.icon, validate_icon)
}

impl UpdateSectionRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.icon.is_none()
            && self.order_index.is_none()
    }
}

/// Display order: ascending position, then id.
pub fn sort_sections(sections: &mut [Section]) {
    sections.sort_by(|a, b| a.order_index.cmp(&b.order_index).then(a.id.cmp(&b.id)));
}
