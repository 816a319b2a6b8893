//! Product pricing.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places stored for prices and discounts.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound on a price, the range of `NUMERIC(12, 2)`.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("special price of {price} at {discount}% off is out of range")]
pub struct PriceOutOfRange {
    pub price: Decimal,
    pub discount: Decimal,
}

impl From<PriceOutOfRange> for sqlx::Error {
    fn from(error: PriceOutOfRange) -> Self {
        Self::Encode(Box::new(error))
    }
}

/// Price after applying a percentage discount, rounded half-away-from-zero to
/// two decimal places.
///
/// # Errors
///
/// Returns an error if the arithmetic overflows.
pub fn special_price(price: Decimal, discount: Decimal) -> Result<Decimal, PriceOutOfRange> {
    price
        .checked_mul(discount)
        .and_then(|off| off.checked_div(Decimal::ONE_HUNDRED))
        .and_then(|off| price.checked_sub(off))
        .map(|special| {
            special.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
        })
        .ok_or(PriceOutOfRange { price, discount })
}

/// Whether a price is storable as given: non-negative, below [`MAX_PRICE`]
/// and with no more than two decimal places.
#[must_use]
pub fn is_valid_price(price: Decimal) -> bool {
    !price.is_sign_negative() && price < MAX_PRICE && has_price_scale(price)
}

/// Whether a discount is a percentage in `0..=100` with at most two decimal
/// places.
#[must_use]
pub fn is_valid_discount(discount: Decimal) -> bool {
    (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&discount) && has_price_scale(discount)
}

// Columns keep two places; anything finer would be rounded on insert.
fn has_price_scale(value: Decimal) -> bool {
    value.normalize().scale() <= PRICE_SCALE
}
