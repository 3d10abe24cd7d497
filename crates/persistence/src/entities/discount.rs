//! Discount entity (row of `discounts` in the other database).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain::models::Discount;
use domain::services::pricing::{DiscountRate, PercentOff};

use crate::error::DataError;

/// Older rows store the percentage in `valore`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountEntity {
    pub id: i64,
    pub product_id: i64,
    pub percentage: Option<f64>,
    pub valore: Option<f64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<DiscountEntity> for Discount {
    type Error = DataError;

    fn try_from(entity: DiscountEntity) -> Result<Self, Self::Error> {
        let rate = DiscountRate {
            percentage: entity.percentage,
            valore: entity.valore,
        };
        let percentage = rate.percent_off().ok_or_else(|| {
            DataError::Decode(format!(
                "discount {} has neither percentage nor valore",
                entity.id
            ))
        })?;
        Ok(Self {
            id: entity.id,
            product_id: entity.product_id,
            percentage,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDiscountRow {
    pub product_id: i64,
    pub percentage: f64,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscountPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
}
