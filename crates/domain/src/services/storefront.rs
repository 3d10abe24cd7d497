//! Builds the public storefront from raw store rows.

use chrono::{DateTime, Utc};

use crate::models::{
    AppliedDiscount, Discount, Package, PackageGroup, StorePackage, StoreSection, Storefront,
};
use crate::services::filter::ContentFilter;
use crate::services::grouping::group_by_section;
use crate::services::pricing::{calculate_discounted_price, round_currency, select_best_discount};

/// Annotates one package with the discount it gets at `now`, if any.
pub fn price_package(
    package: Package,
    discounts: &[Discount],
    now: DateTime<Utc>,
) -> StorePackage {
    let discount = select_best_discount(discounts, package.id, now).map(|d| AppliedDiscount {
        id: d.id,
        percentage: d.percentage,
        discounted_price: round_currency(calculate_discounted_price(package.prezzo, d)),
        expires_at: d.expires_at,
        remaining_seconds: d.remaining(now).map(|c| c.total_seconds),
    });
    StorePackage { package, discount }
}

/// Filters packages, prices them and groups them under their sections.
///
/// Sections are shown by ascending `order_index`; sections left with no
/// packages after filtering are dropped. Packages without a known section
/// form a trailing group with `section: None`.
pub fn build_storefront(
    mut sections: Vec<StoreSection>,
    packages: Vec<Package>,
    discounts: &[Discount],
    filter: &ContentFilter,
    now: DateTime<Utc>,
) -> Storefront {
    sections.sort_by(|a, b| a.order_index.cmp(&b.order_index).then(a.id.cmp(&b.id)));

    let priced: Vec<StorePackage> = packages
        .into_iter()
        .filter(|p| filter.matches(p))
        .map(|p| price_package(p, discounts, now))
        .collect();

    let grouped = group_by_section(sections, priced, |s| s.id, |p| p.package.section_id);

    let mut groups: Vec<PackageGroup<StorePackage>> = grouped
        .groups
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(section, items)| PackageGroup {
            section: Some(section),
            items,
        })
        .collect();

    if !grouped.unassigned.is_empty() {
        groups.push(PackageGroup {
            section: None,
            items: grouped.unassigned,
        });
    }

    Storefront {
        groups,
        generated_at: now,
    }
}
