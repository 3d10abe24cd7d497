//! User repository (main database).

use crate::client::DataClient;
use crate::entities::{NewUserRow, UserEntity, UserPatch};
use crate::error::DataError;

const TABLE: &str = "users";

/// Every column except `password`.
const PUBLIC_COLUMNS: &str = "id,username,can_manage_news,can_manage_rules,can_manage_sections,\
can_manage_store,can_manage_discounts,can_manage_users,can_manage_settings";

/// Repository for admin users.
#[derive(Clone)]
pub struct UserRepository {
    client: DataClient,
}

impl UserRepository {
    pub fn new(client: DataClient) -> Self {
        Self { client }
    }

    /// All users, without their password column.
    pub async fn list(&self) -> Result<Vec<UserEntity>, DataError> {
        self.client
            .from(TABLE)
            .select(PUBLIC_COLUMNS)
            .order("username", true)
            .fetch_all()
            .await
    }

    /// Single equality lookup used by login; includes the stored hash.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserEntity>, DataError> {
        self.client
            .from(TABLE)
            .select("*")
            .eq("username", username)
            .limit(1)
            .fetch_optional()
            .await
    }

    pub async fn create(&self, row: &NewUserRow) -> Result<UserEntity, DataError> {
        let mut created: UserEntity = self.client.from(TABLE).insert(row).fetch_one().await?;
        created.password = None;
        Ok(created)
    }

    /// Applies `patch`; `None` when no user has `id`.
    pub async fn update(&self, id: i64, patch: &UserPatch) -> Result<Option<UserEntity>, DataError> {
        let updated: Option<UserEntity> = self
            .client
            .from(TABLE)
            .update(patch)
            .eq("id", id)
            .fetch_optional()
            .await?;
        Ok(updated.map(|mut user| {
            user.password = None;
            user
        }))
    }

    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<usize, DataError> {
        self.client.from(TABLE).delete().eq("id", id).execute().await
    }
}
