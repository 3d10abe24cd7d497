//! Discount repository (other database).

use chrono::{DateTime, Utc};

use crate::client::{filter, DataClient};
use crate::entities::{DiscountEntity, DiscountPatch, NewDiscountRow};
use crate::error::DataError;
use crate::transport::FilterOp;

const TABLE: &str = "discounts";

#[derive(Clone)]
pub struct DiscountRepository {
    client: DataClient,
}

impl DiscountRepository {
    pub fn new(client: DataClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<DiscountEntity>, DataError> {
        self.client
            .from(TABLE)
            .select("*")
            .order("created_at", false)
            .fetch_all()
            .await
    }

    /// Discounts with no expiry or one after `now`, as the backend filters them.
    pub async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<DiscountEntity>, DataError> {
        self.client
            .from(TABLE)
            .select("*")
            .or_any(vec![
                filter("expires_at", FilterOp::Is, serde_json::Value::Null),
                filter("expires_at", FilterOp::Gt, now),
            ])
            .order("created_at", false)
            .fetch_all()
            .await
    }

    pub async fn create(&self, row: &NewDiscountRow) -> Result<DiscountEntity, DataError> {
        self.client.from(TABLE).insert(row).fetch_one().await
    }

    pub async fn update(
        &self,
        id: i64,
        patch: &DiscountPatch,
    ) -> Result<Option<DiscountEntity>, DataError> {
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
}
