//! Site info repository: reads and upserts the singleton row.

use domain::models::site_info::SITE_INFO_ID;

use crate::client::DataClient;
use crate::entities::{InfoEntity, InfoUpsert};
use crate::error::DataError;

const TABLE: &str = "info";

#[derive(Clone)]
pub struct InfoRepository {
    client: DataClient,
}

impl InfoRepository {
    pub fn new(client: DataClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<Option<InfoEntity>, DataError> {
        self.client
            .from(TABLE)
            .select("*")
            .eq("id", SITE_INFO_ID)
            .fetch_optional()
            .await
    }

    pub async fn upsert(&self, body: &InfoUpsert) -> Result<InfoEntity, DataError> {
        self.client.from(TABLE).upsert(body).fetch_one().await
    }
}
