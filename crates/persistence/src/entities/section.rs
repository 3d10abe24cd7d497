//! Section entity, shared by the `sections` and `rule_sections` tables.

use serde::{Deserialize, Serialize};

use domain::models::{Section, SectionScope};

/// Table holding sections of the given scope.
pub fn section_table(scope: SectionScope) -> &'static str {
    match scope {
        SectionScope::News => "sections",
        SectionScope::Rules => "rule_sections",
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionEntity {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order_index: Option<i32>,
    pub created_by: Option<String>,
}

impl From<SectionEntity> for Section {
    fn from(entity: SectionEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            icon: entity.icon,
            order_index: entity.order_index.unwrap_or(0),
            created_by: entity.created_by,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSectionRow {
    /// Set only when restoring a backup, so ids survive the round trip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order_index: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl From<&Section> for NewSectionRow {
    fn from(section: &Section) -> Self {
        Self {
            id: Some(section.id),
            title: section.title.clone(),
            description: section.description.clone(),
            icon: section.icon.clone(),
            order_index: section.order_index,
            created_by: section.created_by.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}
