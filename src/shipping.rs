//! Shipping tiers

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// Flat shipping price points selectable at checkout.
///
/// Wire codes match the values the storefront forms submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingTier {
    /// Pick-up at HQ or book-your-own courier; no charge.
    #[serde(rename = "0")]
    PickUp,
    /// Delivery within Metro Manila.
    #[serde(rename = "79")]
    MetroManila,
    /// Delivery outside Metro Manila.
    #[serde(rename = "150")]
    OutsideMetroManila,
}

impl ShippingTier {
    /// Flat charge for this tier.
    #[must_use]
    pub const fn price(self) -> Price {
        match self {
            ShippingTier::PickUp => Price::ZERO,
            ShippingTier::MetroManila => Price::from_pesos(79),
            ShippingTier::OutsideMetroManila => Price::from_pesos(150),
        }
    }

    /// Wire code the storefront forms submit for this tier.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            ShippingTier::PickUp => "0",
            ShippingTier::MetroManila => "79",
            ShippingTier::OutsideMetroManila => "150",
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ShippingTier::PickUp => "Pick-up at HQ / Book Your Own Courier",
            ShippingTier::MetroManila => "Metro Manila",
            ShippingTier::OutsideMetroManila => "Outside Metro Manila",
        }
    }

    /// Parses a storefront wire code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(ShippingTier::PickUp),
            "79" => Some(ShippingTier::MetroManila),
            "150" => Some(ShippingTier::OutsideMetroManila),
            _ => None,
        }
    }
}

/// The shipping charge resolved for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingCharge {
    /// No tier chosen yet; contributes nothing to the total.
    Unset,
    /// Waived by a free-shipping line item or an active promotion.
    Free,
    /// The flat charge of the selected tier.
    Tier(ShippingTier),
}

impl ShippingCharge {
    /// Amount this charge adds to the grand total.
    #[must_use]
    pub fn amount(self) -> Price {
        match self {
            ShippingCharge::Unset | ShippingCharge::Free => Price::ZERO,
            ShippingCharge::Tier(tier) => tier.price(),
        }
    }

    /// Whether shipping has been forced free.
    #[must_use]
    pub fn is_free(self) -> bool {
        matches!(self, ShippingCharge::Free)
    }
}
