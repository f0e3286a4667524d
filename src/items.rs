//! Line items

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// Garment sizes offered by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    /// Extra small.
    Xs,
    /// Small.
    S,
    /// Medium.
    M,
    /// Large.
    L,
    /// Extra large.
    Xl,
}

impl Size {
    /// Lowercase wire code for the size, as the storefront forms send it.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Size::Xs => "xs",
            Size::S => "s",
            Size::M => "m",
            Size::L => "l",
            Size::Xl => "xl",
        }
    }

    /// Uppercase label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
        }
    }
}

/// One display format of a product image: a URL and its intrinsic width.
///
/// Carried on line items for rendering only; never consulted by pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFormat {
    /// Location of the rendered image.
    pub url: String,
    /// Intrinsic width in pixels.
    pub width: u32,
}

/// One cart row: a product variant and the quantity being bought.
///
/// The identity key for matching cart operations is `variant_id`; a variant
/// already encodes the size and color combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    product_id: u64,
    variant_id: u64,
    name: String,
    price: Price,
    size: Size,
    color: String,
    qty: u32,
    #[serde(default)]
    image: Vec<ImageFormat>,
    #[serde(default)]
    has_free_shipping: bool,
    #[serde(default)]
    is_preorder: bool,
}

impl LineItem {
    /// Creates a line item for one unit of the given variant.
    #[must_use]
    pub fn new(
        product_id: u64,
        variant_id: u64,
        name: impl Into<String>,
        price: Price,
        size: Size,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            variant_id,
            name: name.into(),
            price,
            size,
            color: color.into(),
            qty: 1,
            image: Vec::new(),
            has_free_shipping: false,
            is_preorder: false,
        }
    }

    /// Sets the quantity.
    #[must_use]
    pub fn with_qty(mut self, qty: u32) -> Self {
        self.qty = qty;
        self
    }

    /// Attaches display image formats.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<Vec<ImageFormat>>) -> Self {
        self.image = image.into();
        self
    }

    /// Marks the line as shipping free of charge.
    #[must_use]
    pub fn with_free_shipping(mut self) -> Self {
        self.has_free_shipping = true;
        self
    }

    /// Marks the line as a preorder.
    #[must_use]
    pub fn with_preorder(mut self) -> Self {
        self.is_preorder = true;
        self
    }

    /// Identifier of the parent product.
    #[must_use]
    pub fn product_id(&self) -> u64 {
        self.product_id
    }

    /// Identifier of the specific size/color variant; the line's identity key.
    #[must_use]
    pub fn variant_id(&self) -> u64 {
        self.variant_id
    }

    /// Product name fixed at add-time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price fixed at add-time.
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Garment size of the variant.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Color of the variant.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Units being bought; zero means the line is logically removed.
    #[must_use]
    pub fn qty(&self) -> u32 {
        self.qty
    }

    /// Display image formats.
    #[must_use]
    pub fn image(&self) -> &[ImageFormat] {
        &self.image
    }

    /// Whether this line ships free of charge.
    #[must_use]
    pub fn has_free_shipping(&self) -> bool {
        self.has_free_shipping
    }

    /// Whether this line is a preorder.
    #[must_use]
    pub fn is_preorder(&self) -> bool {
        self.is_preorder
    }

    /// Adds one unit.
    pub fn increment(&mut self) {
        self.qty = self.qty.saturating_add(1);
    }

    /// Removes one unit, clamping at zero.
    pub fn decrement(&mut self) {
        self.qty = self.qty.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blouse() -> LineItem {
        LineItem::new(7, 21, "Rosa Blouse", Price::from_pesos(999), Size::M, "terracotta")
    }

    #[test]
    fn new_line_item_starts_with_one_unit() {
        let item = blouse();

        assert_eq!(item.qty(), 1);
        assert_eq!(item.variant_id(), 21);
        assert_eq!(item.price(), Price::new(99900));
        assert!(!item.has_free_shipping());
        assert!(!item.is_preorder());
    }

    #[test]
    fn builders_set_flags_and_quantity() {
        let item = blouse().with_qty(3).with_free_shipping().with_preorder();

        assert_eq!(item.qty(), 3);
        assert!(item.has_free_shipping());
        assert!(item.is_preorder());
    }

    #[test]
    fn increment_adds_one_unit() {
        let mut item = blouse();

        item.increment();

        assert_eq!(item.qty(), 2);
    }

    #[test]
    fn decrement_clamps_at_zero() {
        let mut item = blouse();

        item.decrement();
        item.decrement();

        assert_eq!(item.qty(), 0);
    }

    #[test]
    fn size_codes_and_labels() {
        assert_eq!(Size::Xs.code(), "xs");
        assert_eq!(Size::Xl.label(), "XL");
    }

    #[test]
    fn line_item_round_trips_through_json() {
        let item = blouse().with_qty(2).with_image(vec![ImageFormat {
            url: "https://ik.example/rosa-blouse.webp".to_string(),
            width: 480,
        }]);

        let json = serde_json::to_string(&item).expect("line item serializes");
        let restored: LineItem = serde_json::from_str(&json).expect("line item deserializes");

        assert_eq!(restored, item);
    }

    #[test]
    fn json_uses_storefront_field_names() {
        let json = serde_json::to_string(&blouse()).expect("line item serializes");

        assert!(json.contains("\"productId\":7"), "expected camelCase product id");
        assert!(json.contains("\"variantId\":21"), "expected camelCase variant id");
        assert!(json.contains("\"size\":\"m\""), "expected lowercase size code");
    }

    #[test]
    fn missing_optional_fields_default_when_deserializing() {
        let json = r#"{
            "productId": 7,
            "variantId": 21,
            "name": "Rosa Blouse",
            "price": 99900,
            "size": "m",
            "color": "terracotta",
            "qty": 1
        }"#;

        let item: LineItem = serde_json::from_str(json).expect("line item deserializes");

        assert!(item.image().is_empty());
        assert!(!item.has_free_shipping());
        assert!(!item.is_preorder());
    }
}
