//! Site-wide information kept in the singleton `info` row.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Primary key of the only `info` row.
pub const SITE_INFO_ID: i64 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    pub motd: Option<String>,
    pub footer_message: Option<String>,
    pub use_url: Option<String>,
    pub store_url: Option<String>,
    pub store_available: bool,
    pub unavailable_message: Option<String>,
}

/// Sparse update of the info row; written with an upsert on id 1.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteInfoRequest {
    #[validate(length(max = 120, message = "Name must be at most 120 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    pub motd: Option<String>,

    pub footer_message: Option<String>,

    pub use_url: Option<String>,

    pub store_url: Option<String>,

    pub store_available: Option<bool>,

    pub unavailable_message: Option<String>,
}

impl UpdateSiteInfoRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.title.is_none()
            && self.motd.is_none()
            && self.footer_message.is_none()
            && self.use_url.is_none()
            && self.store_url.is_none()
            && self.store_available.is_none()
            && self.unavailable_message.is_none()
    }
}

/// Site info as served to visitors, with the configured support link.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicSiteInfo {
    #[serde(flatten)]
    pub info: SiteInfo,
    pub support_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_info_flattens() {
        let public = PublicSiteInfo {
            info: SiteInfo {
                name: Some("Realm".into()),
                store_available: true,
                ..Default::default()
            },
            support_url: Some("https://discord.gg/realm".into()),
        };
        let json = serde_json::to_value(&public).unwrap();
        assert_eq!(json["name"], "Realm");
        assert_eq!(json["storeAvailable"], true);
        assert_eq!(json["supportUrl"], "https://discord.gg/realm");
    }

    #[test]
    fn test_empty_update_detected() {
        let req: UpdateSiteInfoRequest = serde_json::from_str("{}").unwrap();
        assert!(req.is_empty());
        let req: UpdateSiteInfoRequest =
            serde_json::from_str(r#"{"storeAvailable":false}"#).unwrap();
        assert!(!req.is_empty());
    }
}
