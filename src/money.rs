//! Money
//!
//! Currency amounts are carried as [`rust_decimal::Decimal`] values while
//! arithmetic is in flight and converted to [`rusty_money::Money`] minor
//! units once rounded. Native binary floating point is never used for money.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors converting decimal amounts into minor units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The amount cannot be represented in minor units.
    #[error("amount out of range for minor units: {0}")]
    OutOfRange(Decimal),
}

/// Rounds a currency amount half-up to two decimal places.
///
/// This is the single rounding convention used across the crate: midpoints
/// round away from zero, matching invoicing expectations (banker's rounding
/// is not used).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an already-rounded amount into minor units.
///
/// The amount must have at most two fraction digits; callers round with
/// [`round2`] first.
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] if the minor-unit value does not fit
/// an `i64`.
pub fn minor_units(amount: Decimal) -> Result<i64, AmountError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(AmountError::OutOfRange(amount))
}

/// Converts an already-rounded amount into a [`Money`] value.
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] if the minor-unit value does not fit
/// an `i64`.
pub fn to_money(amount: Decimal, currency: &Currency) -> Result<Money<'_, Currency>, AmountError> {
    Ok(Money::from_minor(minor_units(amount)?, currency))
}
