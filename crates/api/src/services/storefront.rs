//! Storefront and active discounts (other database).

use chrono::{DateTime, Utc};

use domain::models::{Discount, Package, StoreSection, Storefront};
use domain::services::{build_storefront, ContentFilter};
use persistence::repositories::{DiscountRepository, PackageRepository, StoreSectionRepository};
use persistence::{DataError, Databases};

use crate::error::ApiError;

/// Discounts with no expiry or one after `now`.
///
/// The backend filters first; rows are checked again here so a clock
/// difference between the two never lets an expired discount through.
pub async fn load_active_discounts(
    databases: &Databases,
    now: DateTime<Utc>,
) -> Result<Vec<Discount>, ApiError> {
    let rows = DiscountRepository::new(databases.other.clone())
        .list_active(now)
        .await?;

    let discounts = rows
        .into_iter()
        .map(Discount::try_from)
        .collect::<Result<Vec<_>, DataError>>()?;

    Ok(discounts.into_iter().filter(|d| d.is_active(now)).collect())
}

/// Fetches packages, store sections and active discounts together and
/// assembles the storefront.
pub async fn load_storefront(
    databases: &Databases,
    filter: &ContentFilter,
    now: DateTime<Utc>,
) -> Result<Storefront, ApiError> {
    let packages = PackageRepository::new(databases.other.clone());
    let sections = StoreSectionRepository::new(databases.other.clone());

    let (packages, sections, discounts) = tokio::try_join!(
        async { packages.list().await.map_err(ApiError::from) },
        async { sections.list().await.map_err(ApiError::from) },
        load_active_discounts(databases, now),
    )?;

    let packages: Vec<Package> = packages.into_iter().map(Package::from).collect();
    let sections: Vec<StoreSection> = sections.into_iter().map(StoreSection::from).collect();

    Ok(build_storefront(sections, packages, &discounts, filter, now))
}
