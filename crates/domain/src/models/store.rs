//! Store sections, packages and the storefront view built from them.
//!
//! Store rows keep their Italian column names (`nome`, `descrizione`,
//! `immagine`, `prezzo`) on the wire; the storefront client reads them as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_description, validate_image_ref, validate_patch_value};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreSection {
    pub id: i64,
    pub nome: String,
    pub descrizione: Option<String>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: i64,
    pub nome: String,
    pub descrizione: Option<String>,
    pub immagine: Option<String>,
    pub prezzo: f64,
    pub section_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreSectionRequest {
    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 120, message = "Name must be at most 120 characters")
    )]
    pub nome: String,

    #[validate(custom(function = "shared::validation::validate_description"))]
    pub descrizione: Option<String>,

    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_store_section_patch"))]
pub struct UpdateStoreSectionRequest {
    pub id: i64,

    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 120, message = "Name must be at most 120 characters")
    )]
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "crate::models::deserialize_some")]
    pub descrizione: Option<Option<String>>,

    pub order_index: Option<i32>,
}

fn validate_store_section_patch(
    request: &UpdateStoreSectionRequest,
) -> Result<(), ValidationError> {
    validate_patch_value(&request.descrizione, validate_description)
}

impl UpdateStoreSectionRequest {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.descrizione.is_none() && self.order_index.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 120, message = "Name must be at most 120 characters")
    )]
    pub nome: String,

    #[validate(custom(function = "shared::validation::validate_description"))]
    pub descrizione: Option<String>,

    #[validate(custom(function = "shared::validation::validate_image_ref"))]
    pub immagine: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub prezzo: f64,

    pub section_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_package_patch"))]
pub struct UpdatePackageRequest {
    pub id: i64,

    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 120, message = "Name must be at most 120 characters")
    )]
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "crate::models::deserialize_some")]
    pub descrizione: Option<Option<String>>,

    #[serde(default, deserialize_with = "crate::models::deserialize_some")]
    pub immagine: Option<Option<String>>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub prezzo: Option<f64>,

    /// `null` moves the package out of any section.
    #[serde(default, deserialize_with = "crate::models::deserialize_some")]
    pub section_id: Option<Option<i64>>,
}

fn validate_package_patch(request: &UpdatePackageRequest) -> Result<(), ValidationError> {
    validate_patch_value(&request.descrizione, validate_description)?;
    validate_patch_value(&request.immagine, validate_image_ref)
}

impl UpdatePackageRequest {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.descrizione.is_none()
            && self.immagine.is_none()
            && self.prezzo.is_none()
            && self.section_id.is_none()
    }
}

/// The discount the storefront applies to one package.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub id: i64,
    pub percentage: f64,
    pub discounted_price: f64,
    pub expires_at: Option<DateTime<Utc>>,
    /// Seconds until expiry; absent for discounts that never expire.
    pub remaining_seconds: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorePackage {
    #[serde(flatten)]
    pub package: Package,
    pub discount: Option<AppliedDiscount>,
}

impl StorePackage {
    /// Price the buyer pays: discounted when a discount applies.
    pub fn final_price(&self) -> f64 {
        self.discount
            .as_ref()
            .map(|d| d.discounted_price)
            .unwrap_or(self.package.prezzo)
    }
}

/// Items under one section heading. `section` is `None` for the trailing
/// group of items that belong to no section.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageGroup<T> {
    pub section: Option<StoreSection>,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Storefront {
    pub groups: Vec<PackageGroup<StorePackage>>,
    pub generated_at: DateTime<Utc>,
}

impl Storefront {
    pub fn package_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> Package {
        Package {
            id: 5,
            nome: "VIP".into(),
            descrizione: Some("Rango VIP per 30 giorni".into()),
            immagine: None,
            prezzo: 9.99,
            section_id: Some(1),
        }
    }

    #[test]
    fn test_package_keeps_italian_field_names() {
        let json = serde_json::to_value(package()).unwrap();
        assert_eq!(json["nome"], "VIP");
        assert_eq!(json["prezzo"], 9.99);
        assert_eq!(json["sectionId"], 1);
    }

    #[test]
    fn test_store_package_flattens_and_prices() {
        let plain = StorePackage {
            package: package(),
            discount: None,
        };
        assert_eq!(plain.final_price(), 9.99);

        let discounted = StorePackage {
            package: package(),
            discount: Some(AppliedDiscount {
                id: 1,
                percentage: 50.0,
                discounted_price: 5.0,
                expires_at: None,
                remaining_seconds: None,
            }),
        };
        assert_eq!(discounted.final_price(), 5.0);
        let json = serde_json::to_value(&discounted).unwrap();
        assert_eq!(json["nome"], "VIP");
        assert_eq!(json["discount"]["discountedPrice"], 5.0);
    }

    #[test]
    fn test_negative_price_rejected() {
        let req: CreatePackageRequest =
            serde_json::from_str(r#"{"nome":"Kit","prezzo":-1}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreatePackageRequest =
            serde_json::from_str(r#"{"nome":"Kit","prezzo":0}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_package_can_unassign_section() {
        let req: UpdatePackageRequest =
            serde_json::from_str(r#"{"id":5,"sectionId":null}"#).unwrap();
        assert_eq!(req.section_id, Some(None));
        assert!(!req.is_empty());
        let req: UpdatePackageRequest = serde_json::from_str(r#"{"id":5}"#).unwrap();
        assert!(req.is_empty());
    }

    #[test]
    fn test_package_update_validates_image_and_description() {
        let req: UpdatePackageRequest =
            serde_json::from_str(r#"{"id":5,"immagine":"data:image/png;base64,AAAA"}"#).unwrap();
        assert!(req.validate().is_err());

        let long = "x".repeat(2001);
        let req: UpdatePackageRequest =
            serde_json::from_str(&format!(r#"{{"id":5,"descrizione":"{}"}}"#, long)).unwrap();
        assert!(req.validate().is_err());

        let req: UpdatePackageRequest =
            serde_json::from_str(r#"{"id":5,"immagine":null,"descrizione":null}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
