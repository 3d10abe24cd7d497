//! Rule repository (main database).

use crate::client::DataClient;
use crate::entities::{NewRuleRow, RuleEntity, RulePatch};
use crate::error::DataError;

const TABLE: &str = "rules";

#[derive(Clone)]
pub struct RuleRepository {
    client: DataClient,
}

impl RuleRepository {
    pub fn new(client: DataClient) -> Self {
        Self { client }
    }

    /// All rules by ascending `order_index`.
    pub async fn list(&self) -> Result<Vec<RuleEntity>, DataError> {
        self.client
            .from(TABLE)
            .select("*")
            .order("order_index", true)
            .fetch_all()
            .await
    }

    /// Rules of one section by ascending `order_index`.
    pub async fn list_by_section(&self, section_id: i64) -> Result<Vec<RuleEntity>, DataError> {
        self.client
            .from(TABLE)
            .select("*")
            .eq("section_id", section_id)
            .order("order_index", true)
            .fetch_all()
            .await
    }

    pub async fn create(&self, row: &NewRuleRow) -> Result<RuleEntity, DataError> {
        self.client.from(TABLE).insert(row).fetch_one().await
    }

    pub async fn update(&self, id: i64, patch: &RulePatch) -> Result<Option<RuleEntity>, DataError> {
        self.client
            .from(TABLE)
            .update(patch)
            .eq("id", id)
            .fetch_optional()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<usize, DataError> {
        self.client.from(TABLE).delete().eq("id", id).execute().await
    }

    /// Writes a rule keeping its id.
    pub async fn upsert(&self, row: &NewRuleRow) -> Result<usize, DataError> {
        self.client.from(TABLE).upsert(row).execute().await
    }
}
