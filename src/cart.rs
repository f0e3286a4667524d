//! Cart state and reducer
//!
//! [`CartState`] holds the ordered line-item list plus the active promotion
//! and selected shipping tier; [`CartState::apply`] is the pure reducer over
//! the closed [`CartAction`] set. Persistence is the store's concern (see
//! [`crate::store`]) — nothing here performs I/O.

use crate::{items::LineItem, promotions::Promotion, shipping::ShippingTier};

/// Aggregate client cart state.
///
/// The line-item list keeps insertion order, which is also display order.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Vec<LineItem>,
    is_cart_open: bool,
    promo: Option<Promotion>,
    shipping: Option<ShippingTier>,
}

/// Operations accepted by the cart reducer.
///
/// Line items are matched by `variant_id`. No operation panics; an action
/// naming an unknown variant is a no-op.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add one unit of the variant, appending a fresh single-unit line when
    /// the variant is not in the cart yet.
    Increment(LineItem),
    /// Remove one unit of the variant, clamping the quantity at zero.
    Decrement(LineItem),
    /// Drop the variant's line entirely, leaving every other line untouched.
    Delete {
        /// Variant whose line is removed.
        variant_id: u64,
    },
    /// Replace the whole line-item list (hydration, zero-quantity pruning).
    SetCart(Vec<LineItem>),
    /// Replace the active promotion snapshot.
    SetPromotion(Option<Promotion>),
    /// Replace the selected shipping tier.
    SetShippingTier(Option<ShippingTier>),
}

impl CartState {
    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.cart
    }

    /// Whether the line-item list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.cart.iter().map(|line| u64::from(line.qty())).sum()
    }

    /// Active promotion snapshot, if one has been set.
    #[must_use]
    pub fn promo(&self) -> Option<&Promotion> {
        self.promo.as_ref()
    }

    /// Selected shipping tier, if the shopper has picked one.
    #[must_use]
    pub fn shipping(&self) -> Option<ShippingTier> {
        self.shipping
    }

    /// Whether the cart drawer is open. Display state only.
    #[must_use]
    pub fn is_cart_open(&self) -> bool {
        self.is_cart_open
    }

    /// Opens or closes the cart drawer. Display state only, never persisted.
    pub fn set_cart_open(&mut self, open: bool) {
        self.is_cart_open = open;
    }

    /// Applies one action, returning `true` when the line-item list changed
    /// and must be written back to durable storage.
    pub fn apply(&mut self, action: CartAction) -> bool {
        match action {
            CartAction::Increment(item) => {
                let position = self
                    .cart
                    .iter()
                    .position(|line| line.variant_id() == item.variant_id());

                match position {
                    Some(index) => {
                        if let Some(line) = self.cart.get_mut(index) {
                            line.increment();
                        }
                    }
                    None => self.cart.push(item.with_qty(1)),
                }

                true
            }
            CartAction::Decrement(item) => {
                if let Some(line) = self.find_mut(item.variant_id()) {
                    line.decrement();
                }

                true
            }
            CartAction::Delete { variant_id } => {
                self.cart.retain(|line| line.variant_id() != variant_id);

                true
            }
            CartAction::SetCart(items) => {
                self.cart = items;

                true
            }
            CartAction::SetPromotion(promo) => {
                self.promo = promo;

                false
            }
            CartAction::SetShippingTier(tier) => {
                self.shipping = tier;

                false
            }
        }
    }

    fn find_mut(&mut self, variant_id: u64) -> Option<&mut LineItem> {
        self.cart
            .iter_mut()
            .find(|line| line.variant_id() == variant_id)
    }
}
