//! Pricing
//!
//! Pure functions deriving display totals from the cart: subtotal, the
//! threshold-gated promotional discounts, the resolved shipping charge, and
//! the grand total. Nothing here mutates state; [`quote`] assembles one
//! [`Receipt`] per call and is re-run reactively after every cart change.
//!
//! All derived amounts are rounded half-up at minor-unit precision. When the
//! amount and percent components of a promotion are both eligible, the flat
//! amount comes off first and the percentage is applied to the remainder
//! (chained, not stacked against the original subtotal).

use chrono::{DateTime, Utc};
use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    items::LineItem,
    prices::Price,
    promotions::{self, Promotion},
    receipt::Receipt,
    shipping::{ShippingCharge, ShippingTier},
};

/// Errors that can occur while deriving totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line total or running sum exceeded the representable range.
    #[error("cart amounts exceed the representable range")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the cart subtotal: the sum of `price * qty` over all lines.
///
/// Invariant under reordering; a zero-quantity line contributes nothing.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if a line total or the running sum
/// cannot be represented in minor units.
pub fn subtotal(cart: &[LineItem]) -> Result<Price, PricingError> {
    let total = cart.iter().try_fold(0i64, |acc, line| {
        let line_total = (*line.price())
            .checked_mul(i64::from(line.qty()))
            .ok_or(PricingError::Overflow)?;

        acc.checked_add(line_total).ok_or(PricingError::Overflow)
    })?;

    Ok(Price::new(total))
}

/// Calculates the discount amount in minor units for a percentage of a
/// minor-unit amount, rounded half-up.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows
/// or cannot be safely represented.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    (percent * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Flat discount applied when the subtotal meets the promotion's amount
/// threshold; zero otherwise.
#[must_use]
pub fn amount_discount(subtotal: Price, promo: &Promotion) -> Price {
    if *promo.amount() > 0 && subtotal >= promo.amount_threshold() {
        promo.amount()
    } else {
        Price::ZERO
    }
}

/// Percentage discount, gated on the raw subtotal and computed against the
/// amount-discounted remainder.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the percentage calculation
/// cannot be safely represented.
pub fn percent_discount(
    subtotal: Price,
    net_of_amount: Price,
    promo: &Promotion,
) -> Result<Price, PricingError> {
    if subtotal < promo.percent_discount_threshold() {
        return Ok(Price::ZERO);
    }

    Ok(Price::new(percent_of_minor(
        promo.percent_discount(),
        *net_of_amount,
    )?))
}

/// Subtotal net of both discounts, floored at zero.
#[must_use]
pub fn adjusted_total(subtotal: Price, amount: Price, percent: Price) -> Price {
    Price::new(0.max((*subtotal).saturating_sub(*amount).saturating_sub(*percent)))
}

/// Resolves the shipping charge for the cart.
///
/// Shipping is forced free when any line ships free, or when the promotion
/// waives it and the discounted total meets its threshold; forced-free
/// overrides a selected tier. Otherwise the selected tier's flat charge
/// applies, or the charge stays unset until the shopper picks a tier.
#[must_use]
pub fn shipping_charge(
    cart: &[LineItem],
    promo: Option<&Promotion>,
    adjusted: Price,
    selected: Option<ShippingTier>,
) -> ShippingCharge {
    if cart.iter().any(LineItem::has_free_shipping) {
        return ShippingCharge::Free;
    }

    if let Some(promo) = promo
        && promo.is_free_shipping()
        && adjusted >= promo.free_shipping_threshold()
    {
        return ShippingCharge::Free;
    }

    match selected {
        Some(tier) => ShippingCharge::Tier(tier),
        None => ShippingCharge::Unset,
    }
}

/// Adjusted total plus the resolved shipping amount.
///
/// `Free` and `Unset` charges add nothing.
///
/// # Errors
///
/// Returns [`PricingError::Money`] if the money addition fails.
pub fn grand_total(adjusted: Price, shipping: ShippingCharge) -> Result<Price, PricingError> {
    let total = adjusted.to_money().add(shipping.amount().to_money())?;

    Ok(Price::new(total.to_minor_units()))
}

/// Prices the cart end to end, treating an expired promotion as absent.
///
/// # Errors
///
/// Returns a [`PricingError`] if any amount overflows minor units or a
/// percentage cannot be safely represented.
pub fn quote(
    cart: &[LineItem],
    promo: Option<&Promotion>,
    selected: Option<ShippingTier>,
    now: DateTime<Utc>,
) -> Result<Receipt, PricingError> {
    let promo = promotions::active(promo, now);

    let subtotal = subtotal(cart)?;

    let amount = promo.map_or(Price::ZERO, |promo| amount_discount(subtotal, promo));
    let net_of_amount = Price::new((*subtotal).saturating_sub(*amount));

    let percent = match promo {
        Some(promo) => percent_discount(subtotal, net_of_amount, promo)?,
        None => Price::ZERO,
    };

    let adjusted = adjusted_total(subtotal, amount, percent);
    let shipping = shipping_charge(cart, promo, adjusted, selected);
    let total = grand_total(adjusted, shipping)?;

    Ok(Receipt::new(subtotal, amount, percent, adjusted, shipping, total))
}
