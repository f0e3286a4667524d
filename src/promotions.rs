//! Promotions
//!
//! Two discount shapes reach the storefront from the backend: a cart-wide
//! [`Promotion`] with spend thresholds for its percent, amount, and
//! free-shipping components, and per-product [`ProductDiscount`]s that are
//! folded into the unit price before an item ever enters the cart. Both are
//! time-boxed and contribute nothing once expired.

use chrono::{DateTime, Utc};
use decimal_percentage::Percentage;

use crate::{
    prices::Price,
    pricing::{PricingError, percent_of_minor},
};

/// A time-boxed cart promotion.
///
/// Each component is gated on its own spend threshold; a zero threshold
/// means the component always applies while the promotion is active.
#[derive(Debug, Clone)]
pub struct Promotion {
    name: String,
    percent_discount: Percentage,
    percent_discount_threshold: Price,
    amount: Price,
    amount_threshold: Price,
    is_free_shipping: bool,
    free_shipping_threshold: Price,
    expiration_date: DateTime<Utc>,
}

impl Promotion {
    /// Creates a promotion with no discount components.
    #[must_use]
    pub fn new(name: impl Into<String>, expiration_date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            percent_discount: Percentage::from(0.0),
            percent_discount_threshold: Price::ZERO,
            amount: Price::ZERO,
            amount_threshold: Price::ZERO,
            is_free_shipping: false,
            free_shipping_threshold: Price::ZERO,
            expiration_date,
        }
    }

    /// Adds a percentage-off-subtotal component gated on the given spend.
    #[must_use]
    pub fn with_percent_discount(mut self, percent: Percentage, threshold: Price) -> Self {
        self.percent_discount = percent;
        self.percent_discount_threshold = threshold;
        self
    }

    /// Adds a flat amount-off component gated on the given spend.
    #[must_use]
    pub fn with_amount(mut self, amount: Price, threshold: Price) -> Self {
        self.amount = amount;
        self.amount_threshold = threshold;
        self
    }

    /// Waives shipping once the discounted total meets the given spend.
    #[must_use]
    pub fn with_free_shipping(mut self, threshold: Price) -> Self {
        self.is_free_shipping = true;
        self.free_shipping_threshold = threshold;
        self
    }

    /// Promotion name for display.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fractional percentage off the subtotal.
    #[must_use]
    pub fn percent_discount(&self) -> Percentage {
        self.percent_discount
    }

    /// Spend required before the percentage component applies.
    #[must_use]
    pub fn percent_discount_threshold(&self) -> Price {
        self.percent_discount_threshold
    }

    /// Flat amount off the subtotal.
    #[must_use]
    pub fn amount(&self) -> Price {
        self.amount
    }

    /// Spend required before the amount component applies.
    #[must_use]
    pub fn amount_threshold(&self) -> Price {
        self.amount_threshold
    }

    /// Whether this promotion can waive shipping.
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.is_free_shipping
    }

    /// Discounted total required before shipping is waived.
    #[must_use]
    pub fn free_shipping_threshold(&self) -> Price {
        self.free_shipping_threshold
    }

    /// Instant the promotion stops applying.
    #[must_use]
    pub fn expiration_date(&self) -> DateTime<Utc> {
        self.expiration_date
    }

    /// A promotion only applies while the clock is before its expiry.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expiration_date
    }
}

/// Returns the promotion only while it is active at `now`.
///
/// An expired promotion is treated as absent by every totals calculation.
#[must_use]
pub fn active(promo: Option<&Promotion>, now: DateTime<Utc>) -> Option<&Promotion> {
    promo.filter(|promo| promo.is_active(now))
}

/// A per-product discount shown on the product page.
///
/// Unlike a [`Promotion`], these have no spend thresholds; every active
/// discount on a product applies to its retail price at once.
#[derive(Debug, Clone)]
pub struct ProductDiscount {
    percent_discount: Percentage,
    amount: Price,
    is_free_shipping: bool,
    expiration_date: DateTime<Utc>,
}

impl ProductDiscount {
    /// Creates a product discount expiring at the given instant.
    #[must_use]
    pub fn new(
        percent_discount: Percentage,
        amount: Price,
        is_free_shipping: bool,
        expiration_date: DateTime<Utc>,
    ) -> Self {
        Self {
            percent_discount,
            amount,
            is_free_shipping,
            expiration_date,
        }
    }

    /// Fractional percentage off the retail price.
    #[must_use]
    pub fn percent_discount(&self) -> Percentage {
        self.percent_discount
    }

    /// Flat amount off the retail price.
    #[must_use]
    pub fn amount(&self) -> Price {
        self.amount
    }

    /// Whether the discounted product ships free of charge.
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.is_free_shipping
    }

    /// A discount only applies while the clock is before its expiry.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expiration_date
    }
}

/// Unit price after applying every active discount to the retail price.
///
/// Flat amounts and percentages are both taken off the retail price, then
/// the result is clamped at zero. This is the price a line item carries into
/// the cart.
///
/// # Errors
///
/// Returns a [`PricingError`] if a percentage calculation cannot be safely
/// represented in minor units.
pub fn discounted_unit_price(
    retail: Price,
    discounts: &[ProductDiscount],
    now: DateTime<Utc>,
) -> Result<Price, PricingError> {
    let mut minor = *retail;

    for discount in discounts.iter().filter(|discount| discount.is_active(now)) {
        minor = minor
            .saturating_sub(*discount.amount())
            .saturating_sub(percent_of_minor(discount.percent_discount(), *retail)?);
    }

    Ok(Price::new(0.max(minor)))
}

/// Whether any active discount grants the product free shipping.
#[must_use]
pub fn grants_free_shipping(discounts: &[ProductDiscount], now: DateTime<Utc>) -> bool {
    discounts
        .iter()
        .any(|discount| discount.is_active(now) && discount.is_free_shipping())
}
