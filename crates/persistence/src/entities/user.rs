//! Admin user entity (row of `users` in the main database).

use serde::{Deserialize, Serialize};

use domain::models::{Permissions, User};

/// Database row mapping for the users table.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string. Legacy rows may still hold something else.
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub can_manage_news: bool,
    #[serde(default)]
    pub can_manage_rules: bool,
    #[serde(default)]
    pub can_manage_sections: bool,
    #[serde(default)]
    pub can_manage_store: bool,
    #[serde(default)]
    pub can_manage_discounts: bool,
    #[serde(default)]
    pub can_manage_users: bool,
    #[serde(default)]
    pub can_manage_settings: bool,
}

impl UserEntity {
    pub fn permissions(&self) -> Permissions {
        Permissions {
            can_manage_news: self.can_manage_news,
            can_manage_rules: self.can_manage_rules,
            can_manage_sections: self.can_manage_sections,
            can_manage_store: self.can_manage_store,
            can_manage_discounts: self.can_manage_discounts,
            can_manage_users: self.can_manage_users,
            can_manage_settings: self.can_manage_settings,
        }
    }
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            permissions: entity.permissions(),
            username: entity.username,
        }
    }
}

/// Permission columns as written to the table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PermissionColumns {
    pub can_manage_news: bool,
    pub can_manage_rules: bool,
    pub can_manage_sections: bool,
    pub can_manage_store: bool,
    pub can_manage_discounts: bool,
    pub can_manage_users: bool,
    pub can_manage_settings: bool,
}

impl From<Permissions> for PermissionColumns {
    fn from(p: Permissions) -> Self {
        Self {
            can_manage_news: p.can_manage_news,
            can_manage_rules: p.can_manage_rules,
            can_manage_sections: p.can_manage_sections,
            can_manage_store: p.can_manage_store,
            can_manage_discounts: p.can_manage_discounts,
            can_manage_users: p.can_manage_users,
            can_manage_settings: p.can_manage_settings,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUserRow {
    pub username: String,
    pub password: String,
    #[serde(flatten)]
    pub permissions: PermissionColumns,
}

/// Sparse patch; absent fields are left out of the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(flatten)]
    pub permissions: Option<PermissionColumns>,
}
