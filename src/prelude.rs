//! Hemline prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartAction, CartState},
    checkout::{CheckoutError, OrderPayload, PaymentMethod, build_order, prune_empty_lines},
    items::{ImageFormat, LineItem, Size},
    prices::{CURRENCY, Price, php},
    pricing::{PricingError, quote},
    promotions::{ProductDiscount, Promotion},
    receipt::Receipt,
    shipping::{ShippingCharge, ShippingTier},
    storage::{CartStorage, JsonFileStorage, MemoryStorage, SHOPPING_CART_KEY, StorageError},
    store::CartStore,
};
