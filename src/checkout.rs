//! Checkout
//!
//! Order totals are a pure function of the cart, the selected shipping
//! option and the injected price lookup. Every pricing request computes a
//! fresh [`OrderTotals`]; nothing here touches persistence or the network.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    carts::{CartLineItem, ProductId},
    money::{AmountError, round2, to_money},
    products::PriceLookup,
    shipping::ShippingLookup,
};

/// VAT rate applied to order subtotals (12%).
pub fn vat_rate() -> Percentage {
    Percentage::from(Decimal::new(12, 2))
}

/// A cart that cannot be priced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartViolation {
    /// The cart has no line items.
    #[error("cart has no line items")]
    Empty,

    /// A line item has a zero quantity.
    #[error("line {line} for product {product} has zero quantity")]
    ZeroQuantity {
        /// Zero-based index of the offending line.
        line: usize,
        /// Product referenced by the line.
        product: ProductId,
    },
}

/// Errors that can occur while computing order totals.
///
/// Each is a terminal validation failure for the request; the calculator
/// never retries and never returns partial totals.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// The cart failed validation before any pricing was attempted.
    #[error("invalid cart: {0}")]
    InvalidCart(#[from] CartViolation),

    /// The requested shipping method is not offered.
    #[error("unknown shipping method: {0}")]
    UnknownShippingMethod(String),

    /// A line item references a product that is not in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A computed amount cannot be represented in minor units.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Totals for a priced cart.
///
/// All amounts carry exactly two fraction digits. Invariants:
/// `tax == round2(subtotal * 0.12)` and
/// `total == round2(subtotal + tax + shipping)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals<'a> {
    subtotal: Money<'a, Currency>,
    tax: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> OrderTotals<'a> {
    /// Sum of all line extensions, rounded once in aggregate.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// VAT charged on the subtotal.
    #[must_use]
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Shipping fee, passed through from the selected option.
    #[must_use]
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// Grand total.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }
}

/// Computes the totals for a cart and shipping selection.
///
/// Per-line amounts are not individually rounded before summing; only the
/// aggregate subtotal is rounded, so rounding error does not compound across
/// line items. Each distinct product is looked up at most once.
///
/// # Errors
///
/// - [`CheckoutError::InvalidCart`]: the cart is empty or a quantity is zero.
/// - [`CheckoutError::UnknownShippingMethod`]: the shipping id does not resolve.
/// - [`CheckoutError::ProductNotFound`]: a line references a product with no
///   current price; the whole computation aborts with no partial totals.
/// - [`CheckoutError::Amount`]: a computed amount is unrepresentable.
pub fn compute_totals<'a>(
    items: &[CartLineItem],
    shipping_method: &str,
    prices: &impl PriceLookup,
    rates: &impl ShippingLookup<'a>,
) -> Result<OrderTotals<'a>, CheckoutError> {
    validate_cart(items)?;

    let shipping = rates
        .option(shipping_method)
        .ok_or_else(|| CheckoutError::UnknownShippingMethod(shipping_method.to_string()))?;

    let currency = shipping.price.currency();

    let mut unit_prices: FxHashMap<ProductId, Decimal> = FxHashMap::default();
    let mut raw_subtotal = Decimal::ZERO;

    for item in items {
        let unit = match unit_prices.get(&item.product_id) {
            Some(unit) => *unit,
            None => {
                let unit = prices
                    .unit_price(item.product_id)
                    .ok_or(CheckoutError::ProductNotFound(item.product_id))?;

                unit_prices.insert(item.product_id, unit);
                unit
            }
        };

        let line = unit
            .checked_mul(Decimal::from(item.quantity))
            .ok_or(AmountError::OutOfRange(unit))?;

        raw_subtotal = raw_subtotal
            .checked_add(line)
            .ok_or(AmountError::OutOfRange(raw_subtotal))?;
    }

    let subtotal = round2(raw_subtotal);
    let tax = round2(vat_rate() * subtotal);
    let shipping_fee = Decimal::new(shipping.price.to_minor_units(), 2);
    let total = round2(subtotal + tax + shipping_fee);

    Ok(OrderTotals {
        subtotal: to_money(subtotal, currency)?,
        tax: to_money(tax, currency)?,
        shipping: shipping.price,
        total: to_money(total, currency)?,
    })
}

/// Checks the cart invariants: non-empty, all quantities positive.
fn validate_cart(items: &[CartLineItem]) -> Result<(), CartViolation> {
    if items.is_empty() {
        return Err(CartViolation::Empty);
    }

    for (line, item) in items.iter().enumerate() {
        if item.quantity == 0 {
            return Err(CartViolation::ZeroQuantity {
                line,
                product: item.product_id,
            });
        }
    }

    Ok(())
}
