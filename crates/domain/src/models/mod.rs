//! Domain models for the Realm Portal.

pub mod backup;
pub mod discount;
pub mod news;
pub mod rule;
pub mod section;
pub mod session;
pub mod site_info;
pub mod store;
pub mod user;

pub use backup::{Backup, RestoreReport, RestoreStatus, RestoreStep, RestoreStepKind};
pub use discount::{Countdown, CreateDiscountRequest, Discount, UpdateDiscountRequest};
pub use news::{sort_news_for_display, CreateNewsRequest, News, UpdateNewsRequest};
pub use rule::{sort_rules, CreateRuleRequest, Rule, SectionWithRules, UpdateRuleRequest};
pub use section::{
    sort_sections, CreateSectionRequest, Section, SectionScope, UpdateSectionRequest,
};
pub use session::{LoginRequest, LoginResponse, Session, SessionResponse};
pub use site_info::{PublicSiteInfo, SiteInfo, UpdateSiteInfoRequest};
pub use store::{
    AppliedDiscount, CreatePackageRequest, CreateStoreSectionRequest, Package, PackageGroup,
    StorePackage, StoreSection, Storefront, UpdatePackageRequest, UpdateStoreSectionRequest,
};
pub use user::{CreateUserRequest, Permissions, UpdateUserRequest, User};

use serde::{Deserialize, Deserializer, Serialize};

/// Body of the delete endpoints: `{ "id": 7 }`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdRequest {
    pub id: i64,
}

/// `{ "success": true }`
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{ "id": 42 }` returned when only the generated key matters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedId {
    pub id: i64,
}

/// Distinguishes an absent field from an explicit `null` in sparse patches.
///
/// Use with `#[serde(default, deserialize_with = "crate::models::deserialize_some")]`
/// on an `Option<Option<T>>`: absent stays `None`, `null` becomes `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        image: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"image":null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"image":"/a.png"}"#).unwrap();

        assert_eq!(absent.image, None);
        assert_eq!(null.image, Some(None));
        assert_eq!(value.image, Some(Some("/a.png".to_string())));
    }

    #[test]
    fn test_success_response_serializes() {
        let json = serde_json::to_value(SuccessResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
    }
}
