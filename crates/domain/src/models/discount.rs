//! Percentage discounts on store packages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: i64,
    pub product_id: i64,
    pub percentage: f64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Discount {
    /// Active means no expiry, or an expiry strictly after `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            None => true,
            Some(expires_at) => expires_at > now,
        }
    }

    /// Time left before expiry, clamped at zero. `None` for open-ended discounts.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Countdown> {
        self.expires_at
            .map(|expires_at| Countdown::from_seconds((expires_at - now).num_seconds()))
    }
}

/// Remaining time split the way the storefront countdown shows it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub total_seconds: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn from_seconds(total: i64) -> Self {
        let total = total.max(0);
        Self {
            total_seconds: total,
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    pub fn is_elapsed(&self) -> bool {
        self.total_seconds == 0
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscountRequest {
    pub product_id: i64,

    #[validate(range(min = 0.0, max = 100.0, message = "Percentage must be between 0 and 100"))]
    pub percentage: f64,

    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiscountRequest {
    pub id: i64,

    pub product_id: Option<i64>,

    #[validate(range(min = 0.0, max = 100.0, message = "Percentage must be between 0 and 100"))]
    pub percentage: Option<f64>,

    /// `null` turns the discount into an open-ended one.
    #[serde(default, deserialize_with = "crate::models::deserialize_some")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl UpdateDiscountRequest {
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none() && self.percentage.is_none() && self.expires_at.is_none()
    }
}
