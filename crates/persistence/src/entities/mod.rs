//! Row mappings for the backend tables.
//!
//! Entities decode backend rows; `New*Row` and `*Patch` types encode
//! request bodies with the backend's snake_case column names.

pub mod discount;
pub mod info;
pub mod news;
pub mod rule;
pub mod section;
pub mod store;
pub mod user;

pub use discount::{DiscountEntity, DiscountPatch, NewDiscountRow};
pub use info::{InfoEntity, InfoUpsert};
pub use news::{NewNewsRow, NewsEntity, NewsPatch};
pub use rule::{NewRuleRow, RuleEntity, RulePatch};
pub use section::{section_table, NewSectionRow, SectionEntity, SectionPatch};
pub use store::{
    NewPackageRow, NewStoreSectionRow, PackageEntity, PackagePatch, StoreSectionEntity,
    StoreSectionPatch,
};
pub use user::{NewUserRow, PermissionColumns, UserEntity, UserPatch};
