//! News repository (main database).

use crate::client::DataClient;
use crate::entities::{NewNewsRow, NewsEntity, NewsPatch};
use crate::error::DataError;

const TABLE: &str = "news";

#[derive(Clone)]
pub struct NewsRepository {
    client: DataClient,
}

impl NewsRepository {
    pub fn new(client: DataClient) -> Self {
        Self { client }
    }

    /// News in display order: `order_index` desc, then newest first.
    pub async fn list(&self) -> Result<Vec<NewsEntity>, DataError> {
        self.client
            .from(TABLE)
            .select("*")
            .order("order_index", false)
            .order("created_at", false)
            .fetch_all()
            .await
    }

    pub async fn create(&self, row: &NewNewsRow) -> Result<NewsEntity, DataError> {
        self.client.from(TABLE).insert(row).fetch_one().await
    }

    pub async fn update(&self, id: i64, patch: &NewsPatch) -> Result<Option<NewsEntity>, DataError> {
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
