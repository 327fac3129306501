//! Orders
//!
//! Order-level aggregation across the whole product list: subtotals, the
//! accumulated per-line discount, tiered shipping, and the weekday
//! deductions applied to the grand total in a fixed order.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    calendar::Calendar,
    pricing::{PricingError, checked_add, checked_mul, compute_line_price, round_to_whole},
    products::Product,
};

/// Flat component of the shipping cost, kronor.
const SHIPPING_BASE: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Variable component of the shipping cost, as a fraction of the subtotal.
const SHIPPING_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Order quantity from which shipping is free.
pub const FREE_SHIPPING_QUANTITY: u32 = 15;

/// Monday morning deduction, as a fraction of the grand total.
const MONDAY_DISCOUNT_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Flat even-week Tuesday deduction, kronor. Only applied while the grand
/// total still exceeds it.
const TUESDAY_DISCOUNT: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Errors that can occur while aggregating an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No products were provided, so currency could not be determined.
    #[error("no products provided; cannot determine currency")]
    NoProducts,

    /// A product's currency differs from the order currency (index, product
    /// currency, order currency).
    #[error("Product {0} has currency {1}, but the order has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// Wrapped line-price calculation error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Aggregated totals for the whole cart.
///
/// `sub_total` is the baseline at shelf prices, `actual_sub_total` what the
/// lines actually cost, and `discount` their difference. The weekday
/// deduction fields are zero outside their windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals<'a> {
    /// Total number of items across all lines.
    pub total_quantity: u32,

    /// Baseline subtotal at shelf prices.
    pub sub_total: Money<'a, Currency>,

    /// Accumulated per-line discount: `sub_total - actual_sub_total`.
    pub discount: Money<'a, Currency>,

    /// Shipping cost; zero for an empty cart and from
    /// [`FREE_SHIPPING_QUANTITY`] items up, otherwise a flat base plus 10%
    /// of the actual subtotal, kept unrounded.
    pub shipping_cost: Money<'a, Currency>,

    /// Sum of the actual line totals.
    pub actual_sub_total: Money<'a, Currency>,

    /// Monday morning deduction taken off the grand total.
    pub monday_discount_value: Money<'a, Currency>,

    /// Even-week Tuesday deduction taken off the grand total.
    pub tuesday_discount_value: Money<'a, Currency>,

    /// Final amount to pay.
    pub grand_total: Money<'a, Currency>,
}

/// Aggregate order totals across the full product list.
///
/// Most catalog entries will sit at quantity zero; they contribute nothing
/// to the sums. Deductions apply sequentially in a fixed order: the
/// per-line bulk/weekend pricing first, then the Monday morning percentage,
/// then the flat Tuesday deduction. The windows guarantee the two weekday
/// deductions cannot currently coincide, but nothing in the sequence
/// depends on that.
///
/// # Errors
///
/// - [`OrderError::NoProducts`]: the product list was empty.
/// - [`OrderError::CurrencyMismatch`]: a product is priced in a different
///   currency than the first.
/// - [`OrderError::Pricing`]: a line-price calculation overflowed.
pub fn compute_order_totals<'a>(
    products: &[Product<'a>],
    calendar: &Calendar,
) -> Result<OrderTotals<'a>, OrderError> {
    let currency = products.first().ok_or(OrderError::NoProducts)?.price.currency();

    let mut total_quantity = 0u32;
    let mut sub_total = Decimal::ZERO;
    let mut actual_sub_total = Decimal::ZERO;
    let mut discount = Decimal::ZERO;

    for (index, product) in products.iter().enumerate() {
        let product_currency = product.price.currency();

        if product_currency != currency {
            return Err(OrderError::CurrencyMismatch(
                index,
                product_currency.iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        let line = compute_line_price(product, calendar)?;
        let original_total = *line.original_total.amount();
        let line_total = *line.line_total.amount();

        total_quantity = total_quantity.saturating_add(product.amount());
        sub_total = checked_add(sub_total, original_total)?;
        actual_sub_total = checked_add(actual_sub_total, line_total)?;
        discount = checked_add(discount, original_total - line_total)?;
    }

    trace!(total_quantity, %actual_sub_total, "aggregated cart lines");

    let shipping_cost = if total_quantity == 0 || total_quantity >= FREE_SHIPPING_QUANTITY {
        Decimal::ZERO
    } else {
        checked_add(SHIPPING_BASE, checked_mul(actual_sub_total, SHIPPING_RATE)?)?
    };

    let mut grand_total = checked_add(actual_sub_total, shipping_cost)?;

    let mut monday_discount_value = Decimal::ZERO;
    if calendar.monday_morning_discount_window {
        monday_discount_value = round_to_whole(checked_mul(grand_total, MONDAY_DISCOUNT_RATE)?);
        grand_total -= monday_discount_value;

        debug!(value = %monday_discount_value, "monday morning discount applied");
    }

    let mut tuesday_discount_value = Decimal::ZERO;
    if calendar.tuesday_even_week_discount_window && grand_total > TUESDAY_DISCOUNT {
        tuesday_discount_value = TUESDAY_DISCOUNT;
        grand_total -= tuesday_discount_value;

        debug!(value = %tuesday_discount_value, "even-week tuesday discount applied");
    }

    Ok(OrderTotals {
        total_quantity,
        sub_total: Money::from_decimal(sub_total, currency),
        discount: Money::from_decimal(discount, currency),
        shipping_cost: Money::from_decimal(shipping_cost, currency),
        actual_sub_total: Money::from_decimal(actual_sub_total, currency),
        monday_discount_value: Money::from_decimal(monday_discount_value, currency),
        tuesday_discount_value: Money::from_decimal(tuesday_discount_value, currency),
        grand_total: Money::from_decimal(grand_total, currency),
    })
}
