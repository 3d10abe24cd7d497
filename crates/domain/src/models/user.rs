//! Admin users and their management permissions.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// What an admin may manage. Missing flags default to `false`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Permissions {
    pub can_manage_news: bool,
    pub can_manage_rules: bool,
    pub can_manage_sections: bool,
    pub can_manage_store: bool,
    pub can_manage_discounts: bool,
    pub can_manage_users: bool,
    pub can_manage_settings: bool,
}

impl Permissions {
    pub fn all() -> Self {
        Self {
            can_manage_news: true,
            can_manage_rules: true,
            can_manage_sections: true,
            can_manage_store: true,
            can_manage_discounts: true,
            can_manage_users: true,
            can_manage_settings: true,
        }
    }
}

/// An admin account. The password hash never leaves the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(flatten)]
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(custom(function = "shared::validation::validate_username"))]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[serde(default)]
    pub permissions: Permissions,
}

/// Body of `PUT /api/user-update`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: i64,

    #[validate(custom(function = "shared::validation::validate_username"))]
    pub username: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,

    pub permissions: Option<Permissions>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.permissions.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_never_serializes_password() {
        let user = User {
            id: 1,
            username: "admin".into(),
            permissions: Permissions::all(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["canManageUsers"], true);
    }

    #[test]
    fn test_missing_permission_flags_default_false() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"username":"mod","password":"s3cretpass","permissions":{"canManageNews":true}}"#,
        )
        .unwrap();
        assert!(req.permissions.can_manage_news);
        assert!(!req.permissions.can_manage_users);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username":"mod","password":"abc"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_with_only_password() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"id":2,"password":"n3wpassword"}"#).unwrap();
        assert!(!req.is_empty());
        assert!(req.username.is_none());
    }
}
