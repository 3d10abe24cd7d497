//! Store section and package repositories (other database).

use crate::client::DataClient;
use crate::entities::{
    NewPackageRow, NewStoreSectionRow, PackageEntity, PackagePatch, StoreSectionEntity,
    StoreSectionPatch,
};
use crate::error::DataError;

#[derive(Clone)]
pub struct StoreSectionRepository {
    client: DataClient,
}

impl StoreSectionRepository {
    const TABLE: &'static str = "store_sections";

    pub fn new(client: DataClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<StoreSectionEntity>, DataError> {
        self.client
            .from(Self::TABLE)
            .select("*")
            .order("order_index", true)
            .fetch_all()
            .await
    }

    pub async fn create(&self, row: &NewStoreSectionRow) -> Result<StoreSectionEntity, DataError> {
        self.client.from(Self::TABLE).insert(row).fetch_one().await
    }

    pub async fn update(
        &self,
        id: i64,
        patch: &StoreSectionPatch,
    ) -> Result<Option<StoreSectionEntity>, DataError> {
        self.client
            .from(Self::TABLE)
            .update(patch)
            .eq("id", id)
            .fetch_optional()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<usize, DataError> {
        self.client.from(Self::TABLE).delete().eq("id", id).execute().await
    }
}

#[derive(Clone)]
pub struct PackageRepository {
    client: DataClient,
}

impl PackageRepository {
    const TABLE: &'static str = "packages";

    pub fn new(client: DataClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<PackageEntity>, DataError> {
        self.client
            .from(Self::TABLE)
            .select("*")
            .order("id", true)
            .fetch_all()
            .await
    }

    pub async fn create(&self, row: &NewPackageRow) -> Result<PackageEntity, DataError> {
        self.client.from(Self::TABLE).insert(row).fetch_one().await
    }

    pub async fn update(
        &self,
        id: i64,
        patch: &PackagePatch,
    ) -> Result<Option<PackageEntity>, DataError> {
        self.client
            .from(Self::TABLE)
            .update(patch)
            .eq("id", id)
            .fetch_optional()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<usize, DataError> {
        self.client.from(Self::TABLE).delete().eq("id", id).execute().await
    }
}
