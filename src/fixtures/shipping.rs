//! Shipping Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    money::{minor_units, round2},
};

/// Wrapper for shipping options in YAML
#[derive(Debug, Deserialize)]
pub struct ShippingFixture {
    /// Map of option id -> option fixture
    pub options: FxHashMap<String, ShippingOptionFixture>,
}

/// Shipping Option Fixture
#[derive(Debug, Deserialize)]
pub struct ShippingOptionFixture {
    /// Display name
    pub name: String,

    /// Flat fee (e.g., "150.00 PHP")
    pub price: String,

    /// Carrier fulfilling the delivery
    pub carrier: String,
}

/// Parses a shipping fee string into minor units and currency.
///
/// Shipping fees must already be two-decimal amounts; unlike catalog prices
/// they are passed through to totals unmodified.
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or carries sub-cent
/// precision.
pub fn parse_fee(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let (amount, currency) = parse_price(s)?;

    if round2(amount) != amount || amount < Decimal::ZERO {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor = minor_units(amount).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor, currency))
}
