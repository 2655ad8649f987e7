//! Price arithmetic helpers.
//!
//! All ticket, product, and coupon prices are `rust_decimal::Decimal` values
//! rounded to two decimal places (cents), midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on every stored price.
pub const PRICE_SCALE: u32 = 2;

/// Rounds a price to two decimal places, midpoint away from zero.
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percent discount to a price: `original * (1 - percent/100)`,
/// rounded to two decimal places.
///
/// Callers are expected to have validated `percent` to the 0..=100 range.
pub fn percent_off(original: Decimal, percent: Decimal) -> Decimal {
    let factor = Decimal::ONE - percent / Decimal::ONE_HUNDRED;
    round_price(original * factor)
}

/// Clamps a price to be non-negative. Manual price edits are clamped rather
/// than rejected; there is no upper bound.
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else {
        value
    }
}
