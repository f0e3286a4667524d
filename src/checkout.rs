//! Checkout
//!
//! Builds the order-creation payload from the current cart state. The
//! backend call itself belongs to the caller; a failed submission leaves the
//! cart untouched so the shopper can retry, and a confirmed order is
//! followed by [`crate::store::CartStore::clear`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::{
    cart::CartState,
    items::LineItem,
    pricing::{self, PricingError},
    prices::Price,
    receipt::Receipt,
    shipping::ShippingTier,
};

/// Payment methods the storefront accepts. Labels only; the shopper settles
/// off-platform and the backend reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// `GCash` mobile wallet transfer.
    GCash,
    /// BPI bank transfer.
    Bpi,
}

/// Errors raised while assembling an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Submitting with nothing to buy is rejected before any backend call.
    #[error("cart is empty; nothing to order")]
    EmptyCart,

    /// A shipping tier must be chosen before an order can be built.
    #[error("no shipping tier selected")]
    MissingShippingTier,

    /// Totals could not be derived for the cart.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The payload could not be serialized.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Wire payload for the order-creation call.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    items: Vec<LineItem>,
    shipping: Price,
    payment_method: PaymentMethod,
    subtotal: Price,
    discount: Price,
    total: Price,
}

impl OrderPayload {
    /// Line items being ordered, zero-quantity lines already pruned.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Flat charge of the selected shipping tier.
    #[must_use]
    pub fn shipping(&self) -> Price {
        self.shipping
    }

    /// Payment method label.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Cart subtotal before discounts and shipping.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Total promotional savings.
    #[must_use]
    pub fn discount(&self) -> Price {
        self.discount
    }

    /// Amount payable.
    #[must_use]
    pub fn total(&self) -> Price {
        self.total
    }

    /// Serializes the payload for the order-creation mutation.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CheckoutError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds the order payload from the current cart state.
///
/// Zero-quantity lines are pruned first; a cart with nothing left to buy or
/// no selected shipping tier is rejected before any totals are computed.
/// Returns the payload together with the receipt it was priced from.
///
/// # Errors
///
/// Returns a [`CheckoutError`] when the cart is empty, no shipping tier is
/// selected, or totals cannot be derived.
pub fn build_order(
    state: &CartState,
    payment: PaymentMethod,
    now: DateTime<Utc>,
) -> Result<(OrderPayload, Receipt), CheckoutError> {
    let items: Vec<LineItem> = state
        .items()
        .iter()
        .filter(|line| line.qty() > 0)
        .cloned()
        .collect();

    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let Some(tier) = state.shipping() else {
        return Err(CheckoutError::MissingShippingTier);
    };

    let receipt = pricing::quote(&items, state.promo(), Some(tier), now)?;

    let payload = OrderPayload {
        items,
        shipping: tier.price(),
        payment_method: payment,
        subtotal: receipt.subtotal(),
        discount: receipt.savings(),
        total: receipt.total(),
    };

    Ok((payload, receipt))
}

/// Prunes zero-quantity lines from a cart list.
///
/// The result is what [`crate::cart::CartAction::SetCart`] receives at
/// checkout time to drop logically removed lines from durable storage.
#[must_use]
pub fn prune_empty_lines(cart: &[LineItem]) -> Vec<LineItem> {
    cart.iter().filter(|line| line.qty() > 0).cloned().collect()
}
