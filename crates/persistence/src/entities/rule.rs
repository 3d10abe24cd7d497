//! Rule entity (row of `rules` in the main database).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain::models::Rule;

#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntity {
    pub id: i64,
    pub section_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub order_index: Option<i32>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<RuleEntity> for Rule {
    fn from(entity: RuleEntity) -> Self {
        Self {
            id: entity.id,
            section_id: entity.section_id,
            title: entity.title,
            content: entity.content,
            order_index: entity.order_index.unwrap_or(0),
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRuleRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub section_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub order_index: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl From<&Rule> for NewRuleRow {
    fn from(rule: &Rule) -> Self {
        Self {
            id: Some(rule.id),
            section_id: rule.section_id,
            title: rule.title.clone(),
            content: rule.content.clone(),
            order_index: rule.order_index,
            created_by: rule.created_by.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_row_keeps_id() {
        let rule = Rule {
            id: 12,
            section_id: Some(3),
            title: "No grief".into(),
            content: "Vietato distruggere".into(),
            order_index: 1,
            created_by: None,
            created_at: None,
            updated_at: None,
        };
        let row = NewRuleRow::from(&rule);
        let body = serde_json::to_value(&row).unwrap();
        assert_eq!(body["id"], 12);
        assert_eq!(body["section_id"], 3);
        assert!(body.get("created_by").is_none());
    }
}
