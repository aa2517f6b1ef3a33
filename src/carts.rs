//! Carts
//!
//! Transient cart line items, constructed per checkout request from the
//! `POST /v1/orders/calculate-totals` body and discarded once totals are
//! returned. Nothing here is persisted.

use std::fmt;

use serde::Deserialize;

/// Identifier of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a new product identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single product line in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CartLineItem {
    /// Product being purchased.
    pub product_id: ProductId,

    /// Number of units. Must be at least one; validated when totals are
    /// computed, not at construction.
    pub quantity: u32,
}

impl CartLineItem {
    /// Creates a new cart line item.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Body of a totals calculation request.
#[derive(Debug, Clone, Deserialize)]
pub struct TotalsRequest {
    /// Cart line items.
    pub items: Vec<CartLineItem>,

    /// Identifier of the selected shipping option.
    pub shipping_method: String,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_item_deserializes_from_wire_shape() -> TestResult {
        let item: CartLineItem =
            serde_norway::from_str("product_id: 7\nquantity: 3\n")?;

        assert_eq!(item, CartLineItem::new(7u64, 3));

        Ok(())
    }

    #[test]
    fn totals_request_deserializes_items_and_method() -> TestResult {
        let request: TotalsRequest = serde_norway::from_str(
            "items:\n  - product_id: 1\n    quantity: 2\nshipping_method: standard\n",
        )?;

        assert_eq!(request.items, vec![CartLineItem::new(1u64, 2)]);
        assert_eq!(request.shipping_method, "standard");

        Ok(())
    }

    #[test]
    fn product_id_displays_bare_number() {
        assert_eq!(ProductId::new(42).to_string(), "42");
    }
}
