//! Server rules, grouped under rule sections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::section::Section;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: i64,
    pub section_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub order_index: i32,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    pub section_id: i64,

    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 200, message = "Title must be at most 200 characters")
    )]
    pub title: String,

    pub content: String,

    pub order_index: Option<i32>,

    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRuleRequest {
    pub id: i64,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: Option<String>,

    pub content: Option<String>,

    pub order_index: Option<i32>,

    pub section_id: Option<i64>,
}

impl UpdateRuleRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.order_index.is_none()
            && self.section_id.is_none()
    }
}

/// A rule section together with its rules, as the rules page renders it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionWithRules {
    #[serde(flatten)]
    pub section: Section,
    pub rules: Vec<Rule>,
}

/// Rules read top to bottom by ascending `order_index`.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| a.order_index.cmp(&b.order_index).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: i64, order_index: i32) -> Rule {
        Rule {
            id,
            section_id: Some(1),
            title: format!("Regola {}", id),
            content: "Niente griefing".into(),
            order_index,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_sort_rules_ascending() {
        let mut rules = vec![rule(1, 3), rule(2, 1), rule(3, 2)];
        sort_rules(&mut rules);
        let ids: Vec<i64> = rules.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_section_with_rules_flattens_section() {
        let grouped = SectionWithRules {
            section: Section {
                id: 4,
                title: "PvP".into(),
                description: None,
                icon: None,
                order_index: 1,
                created_by: None,
            },
            rules: vec![rule(1, 0)],
        };
        let json = serde_json::to_value(&grouped).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["title"], "PvP");
        assert_eq!(json["rules"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_update_rule_is_empty() {
        let req: UpdateRuleRequest = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert!(req.is_empty());
        let req: UpdateRuleRequest = serde_json::from_str(r#"{"id":1,"orderIndex":2}"#).unwrap();
        assert!(!req.is_empty());
    }
}
