//! Discount arithmetic for store packages.

use chrono::{DateTime, Utc};

use crate::models::Discount;

/// Anything that carries a percentage reduction.
pub trait PercentOff {
    /// Percentage to take off, or `None` when no reduction is known.
    fn percent_off(&self) -> Option<f64>;
}

impl PercentOff for f64 {
    fn percent_off(&self) -> Option<f64> {
        Some(*self)
    }
}

impl PercentOff for Discount {
    fn percent_off(&self) -> Option<f64> {
        Some(self.percentage)
    }
}

/// Raw discount figures as stored: older rows carry `valore` instead of
/// `percentage`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiscountRate {
    pub percentage: Option<f64>,
    pub valore: Option<f64>,
}

impl PercentOff for DiscountRate {
    fn percent_off(&self) -> Option<f64> {
        self.percentage.or(self.valore)
    }
}

impl<T: PercentOff> PercentOff for Option<T> {
    fn percent_off(&self) -> Option<f64> {
        self.as_ref().and_then(PercentOff::percent_off)
    }
}

/// `price * (1 - pct / 100)`.
///
/// The percentage is not clamped here; out-of-range values are rejected when
/// a discount is written. Without a known percentage the price is unchanged.
pub fn calculate_discounted_price<D: PercentOff + ?Sized>(price: f64, discount: &D) -> f64 {
    match discount.percent_off() {
        Some(pct) => price * (1.0 - pct / 100.0),
        None => price,
    }
}

/// Rounds to cents for display.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Picks the discount the storefront applies to `product_id`: among the
/// active ones, the highest percentage, then the most recently created.
pub fn select_best_discount<'a>(
    discounts: &'a [Discount],
    product_id: i64,
    now: DateTime<Utc>,
) -> Option<&'a Discount> {
    discounts
        .iter()
        .filter(|d| d.product_id == product_id && d.is_active(now))
        .max_by(|a, b| {
            a.percentage
                .total_cmp(&b.percentage)
                .then_with(|| a.created_at.cmp(&b.created_at))
        })
}
