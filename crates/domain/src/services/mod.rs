//! Domain services for the Realm Portal.
//!
//! Pure logic shared by the public pages and the admin panel: filtering,
//! grouping and discount pricing.

pub mod filter;
pub mod grouping;
pub mod pricing;
pub mod storefront;

pub use filter::{
    filter_items, ContentFilter, ContentQuery, FilterError, SectionFilter, Searchable,
};
pub use grouping::{group_by_section, sections_with_rules, Grouped};
pub use pricing::{
    calculate_discounted_price, round_currency, select_best_discount, DiscountRate, PercentOff,
};
pub use storefront::{build_storefront, price_package};
