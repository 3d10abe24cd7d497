//! Section repository, for both news sections and rule sections.

use domain::models::SectionScope;

use crate::client::DataClient;
use crate::entities::{section_table, NewSectionRow, SectionEntity, SectionPatch};
use crate::error::DataError;

/// Repository for one family of sections.
#[derive(Clone)]
pub struct SectionRepository {
    client: DataClient,
    scope: SectionScope,
}

impl SectionRepository {
    pub fn new(client: DataClient, scope: SectionScope) -> Self {
        Self { client, scope }
    }

    pub fn scope(&self) -> SectionScope {
        self.scope
    }

    fn table(&self) -> &'static str {
        section_table(self.scope)
    }

    /// Sections by ascending `order_index`.
    pub async fn list(&self) -> Result<Vec<SectionEntity>, DataError> {
        self.client
            .from(self.table())
            .select("*")
            .order("order_index", true)
            .fetch_all()
            .await
    }

    pub async fn create(&self, row: &NewSectionRow) -> Result<SectionEntity, DataError> {
        self.client.from(self.table()).insert(row).fetch_one().await
    }

    /// Applies `patch`; `None` when no row has `id`.
    pub async fn update(
        &self,
        id: i64,
        patch: &SectionPatch,
    ) -> Result<Option<SectionEntity>, DataError> {
        self.client
            .from(self.table())
            .update(patch)
            .eq("id", id)
            .fetch_optional()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<usize, DataError> {
        self.client.from(self.table()).delete().eq("id", id).execute().await
    }

    /// Deletes every section. The backend refuses unfiltered deletes, so the
    /// filter matches all non-negative ids.
    pub async fn delete_all(&self) -> Result<usize, DataError> {
        self.client
            .from(self.table())
            .delete()
            .gte("id", 0)
            .execute()
            .await
    }

    /// Writes a section keeping its id.
    pub async fn upsert(&self, row: &NewSectionRow) -> Result<usize, DataError> {
        self.client.from(self.table()).upsert(row).execute().await
    }
}
