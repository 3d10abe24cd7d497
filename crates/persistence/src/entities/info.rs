//! Site info entity: the singleton row of `info`.

use serde::{Deserialize, Serialize};

use domain::models::site_info::SITE_INFO_ID;
use domain::models::{SiteInfo, UpdateSiteInfoRequest};

#[derive(Debug, Clone, Deserialize)]
pub struct InfoEntity {
    pub id: i64,
    pub name: Option<String>,
    pub title: Option<String>,
    pub motd: Option<String>,
    pub footer_message: Option<String>,
    pub use_url: Option<String>,
    pub store_url: Option<String>,
    pub store_available: Option<bool>,
    pub unavailable_message: Option<String>,
}

impl From<InfoEntity> for SiteInfo {
    fn from(entity: InfoEntity) -> Self {
        Self {
            name: entity.name,
            title: entity.title,
            motd: entity.motd,
            footer_message: entity.footer_message,
            use_url: entity.use_url,
            store_url: entity.store_url,
            store_available: entity.store_available.unwrap_or(false),
            unavailable_message: entity.unavailable_message,
        }
    }
}

/// Upsert body for the singleton row; always targets id 1.
#[derive(Debug, Clone, Serialize)]
pub struct InfoUpsert {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_message: Option<String>,
}

impl From<UpdateSiteInfoRequest> for InfoUpsert {
    fn from(req: UpdateSiteInfoRequest) -> Self {
        Self {
            id: SITE_INFO_ID,
            name: req.name,
            title: req.title,
            motd: req.motd,
            footer_message: req.footer_message,
            use_url: req.use_url,
            store_url: req.store_url,
            store_available: req.store_available,
            unavailable_message: req.unavailable_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upsert_targets_singleton() {
        let req = UpdateSiteInfoRequest {
            motd: Some("Benvenuti".into()),
            ..Default::default()
        };
        let body = serde_json::to_value(InfoUpsert::from(req)).unwrap();
        assert_eq!(body, json!({"id": 1, "motd": "Benvenuti"}));
    }
}
