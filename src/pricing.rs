//! Pricing
//!
//! Per-line price calculation: bulk tier selection, the weekend surcharge,
//! and the full-price baseline the order-level discount is measured against.
//! Every derived step is rounded to whole kronor on its own, matching the
//! storefront's posted prices.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::trace;

use crate::{calendar::Calendar, products::Product};

/// Quantity at which the bulk unit price takes over.
pub const BULK_THRESHOLD: u32 = 10;

/// Weekend surcharge multiplier.
const SURCHARGE_RATE: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

/// Errors that can occur while calculating a line price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A price multiplication overflowed the decimal range.
    #[error("price arithmetic overflowed")]
    Arithmetic,
}

/// Calculated prices for one cart line.
///
/// All values are whole kronor. The `original_*` fields carry the
/// shelf-price baseline (surcharged when the surcharge window is active,
/// but never bulk-tiered); the difference between baseline and actual line
/// total is the per-line discount reported on the order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrice<'a> {
    /// Unit price actually charged, after bulk tiering and surcharge.
    pub unit_price: Money<'a, Currency>,

    /// `round(unit_price * amount)`.
    pub line_total: Money<'a, Currency>,

    /// Bulk unit price before any surcharge, for display.
    pub bulk_unit_price: Money<'a, Currency>,

    /// Shelf unit price with surcharge applied when active.
    pub original_unit_price: Money<'a, Currency>,

    /// Baseline total at the shelf unit price.
    pub original_total: Money<'a, Currency>,
}

/// Calculate the prices for one cart line.
///
/// The quantity selects the tier: below [`BULK_THRESHOLD`] the shelf price
/// applies, from the threshold up the bulk price does. During the weekend
/// surcharge window every unit price is marked up by 15% and re-rounded.
/// The two tiers accumulate rounding differently on the baseline total —
/// below the threshold the surcharged unit is rounded before multiplying,
/// at or above it the product is rounded in one step — and both behaviours
/// are part of the posted-price contract.
///
/// A zero quantity still yields a defined `unit_price` with a zero
/// `line_total`.
///
/// # Errors
///
/// Returns [`PricingError::Arithmetic`] if a multiplication overflows the
/// decimal range; unreachable for catalog-scale prices and quantities.
pub fn compute_line_price<'a>(
    product: &Product<'a>,
    calendar: &Calendar,
) -> Result<LinePrice<'a>, PricingError> {
    let currency = product.price.currency();
    let quantity = Decimal::from(product.amount());
    let shelf = *product.price.amount();
    let bulk = *product.bulk_price.amount();
    let bulk_tier = product.amount() >= BULK_THRESHOLD;

    let mut unit = if bulk_tier { bulk } else { shelf };
    let mut original_unit = shelf;
    let mut original_total = checked_mul(shelf, quantity)?;

    if calendar.weekend_surcharge_window {
        original_unit = round_to_whole(checked_mul(shelf, SURCHARGE_RATE)?);

        original_total = if bulk_tier {
            round_to_whole(checked_mul(checked_mul(shelf, SURCHARGE_RATE)?, quantity)?)
        } else {
            round_to_whole(checked_mul(original_unit, quantity)?)
        };

        unit = round_to_whole(checked_mul(unit, SURCHARGE_RATE)?);

        trace!(product_id = product.id, "weekend surcharge applied");
    }

    let line_total = round_to_whole(checked_mul(unit, quantity)?);

    Ok(LinePrice {
        unit_price: Money::from_decimal(unit, currency),
        line_total: Money::from_decimal(line_total, currency),
        bulk_unit_price: product.bulk_price,
        original_unit_price: Money::from_decimal(original_unit, currency),
        original_total: Money::from_decimal(original_total, currency),
    })
}

/// Round to the nearest whole krona, halves away from zero.
pub(crate) fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiply two decimals, surfacing overflow instead of panicking.
pub(crate) fn checked_mul(lhs: Decimal, rhs: Decimal) -> Result<Decimal, PricingError> {
    lhs.checked_mul(rhs).ok_or(PricingError::Arithmetic)
}

/// Add two decimals, surfacing overflow instead of panicking.
pub(crate) fn checked_add(lhs: Decimal, rhs: Decimal) -> Result<Decimal, PricingError> {
    lhs.checked_add(rhs).ok_or(PricingError::Arithmetic)
}
