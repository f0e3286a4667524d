//! Prices

use std::ops::Deref;

use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};

/// Currency for every monetary value in the crate: the Philippine peso.
pub const CURRENCY: &iso::Currency = iso::PHP;

/// Represents a price in centavos (currency minor units).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: i64,
}

impl Price {
    /// A zero amount.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new price from minor units.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Price { value }
    }

    /// Creates a new price from whole pesos.
    #[must_use]
    pub const fn from_pesos(pesos: i64) -> Self {
        Price {
            value: pesos * 100,
        }
    }

    /// The price as display money.
    #[must_use]
    pub fn to_money(self) -> Money<'static, iso::Currency> {
        Money::from_minor(self.value, CURRENCY)
    }
}

impl Deref for Price {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

/// Display money in the crate currency from minor units.
#[must_use]
pub fn php(minor: i64) -> Money<'static, iso::Currency> {
    Money::from_minor(minor, CURRENCY)
}
