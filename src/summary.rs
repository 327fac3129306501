//! Summary
//!
//! The checkout-facing view of an order: one line per product actually in
//! the cart, plus the aggregated totals, renderable as a terminal receipt.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    calendar::Calendar,
    order::{OrderError, OrderTotals, compute_order_totals},
    pricing::compute_line_price,
    products::Product,
};

/// Errors that can occur when rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error")]
    Io,
}

/// One summary line: a product with a positive quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine<'a> {
    /// Product id.
    pub id: u32,

    /// Product display name.
    pub name: String,

    /// Quantity in the cart.
    pub amount: u32,

    /// Unit price actually charged.
    pub unit_price: Money<'a, Currency>,

    /// Line total actually charged.
    pub line_total: Money<'a, Currency>,
}

/// Order summary: the populated cart lines and the aggregated totals.
#[derive(Debug, Clone)]
pub struct OrderSummary<'a> {
    lines: SmallVec<[SummaryLine<'a>; 12]>,
    totals: OrderTotals<'a>,
}

impl<'a> OrderSummary<'a> {
    /// Build a summary for the products with a positive quantity.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the aggregation fails.
    pub fn for_products(
        products: &[Product<'a>],
        calendar: &Calendar,
    ) -> Result<Self, OrderError> {
        let totals = compute_order_totals(products, calendar)?;

        let mut lines = SmallVec::new();

        for product in products.iter().filter(|product| product.amount() > 0) {
            let line = compute_line_price(product, calendar)?;

            lines.push(SummaryLine {
                id: product.id,
                name: product.name.clone(),
                amount: product.amount(),
                unit_price: line.unit_price,
                line_total: line.line_total,
            });
        }

        Ok(OrderSummary { lines, totals })
    }

    /// The populated cart lines, in shelf order.
    pub fn lines(&self) -> &[SummaryLine<'a>] {
        &self.lines
    }

    /// The aggregated totals.
    pub fn totals(&self) -> &OrderTotals<'a> {
        &self.totals
    }

    /// Render the summary as a receipt table followed by a totals block.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for line in &self.lines {
            builder.push_record([
                format!("#{:<3}", line.id),
                line.name.clone(),
                line.amount.to_string(),
                line.unit_price.to_string(),
                line.line_total.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| SummaryError::Io)?;

        self.write_totals(&mut out)
    }

    fn write_totals(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let totals = &self.totals;

        writeln!(out, " Subtotal:      {}", totals.sub_total).map_err(|_err| SummaryError::Io)?;
        writeln!(out, " Discount:      {}", totals.discount).map_err(|_err| SummaryError::Io)?;
        writeln!(out, " Shipping:      {}", totals.shipping_cost)
            .map_err(|_err| SummaryError::Io)?;

        if *totals.monday_discount_value.amount() != Decimal::ZERO {
            writeln!(out, " Monday offer:  -{}", totals.monday_discount_value)
                .map_err(|_err| SummaryError::Io)?;
        }

        if *totals.tuesday_discount_value.amount() != Decimal::ZERO {
            writeln!(out, " Tuesday offer: -{}", totals.tuesday_discount_value)
                .map_err(|_err| SummaryError::Io)?;
        }

        writeln!(out, " Total:         {}", totals.grand_total).map_err(|_err| SummaryError::Io)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::catalog;

    use super::*;

    fn weekday() -> Result<Calendar, chrono::ParseError> {
        Ok(Calendar::at(NaiveDateTime::parse_from_str(
            "2025-01-15 12:00",
            "%Y-%m-%d %H:%M",
        )?))
    }

    fn populated_summary() -> TestResult<OrderSummary<'static>> {
        let mut products = catalog::builtin()?;

        for product in &mut products {
            match product.id {
                1 => product.set_amount(2),
                3 => product.set_amount(12),
                _ => {}
            }
        }

        Ok(OrderSummary::for_products(&products, &weekday()?)?)
    }

    #[test]
    fn only_populated_lines_appear() -> TestResult {
        let summary = populated_summary()?;

        assert_eq!(summary.lines().len(), 2);

        let ids: Vec<u32> = summary.lines().iter().map(|line| line.id).collect();
        assert_eq!(ids, vec![1, 3]);

        Ok(())
    }

    #[test]
    fn lines_carry_the_calculated_prices() -> TestResult {
        let summary = populated_summary()?;

        // Product 3 is 10 kr; at 12 items the 9 kr bulk unit applies.
        let expected = SummaryLine {
            id: 3,
            name: "Sockerdröm".to_string(),
            amount: 12,
            unit_price: Money::from_major(9, iso::SEK),
            line_total: Money::from_major(108, iso::SEK),
        };

        assert!(
            summary.lines().contains(&expected),
            "expected bulk-priced line for product 3"
        );

        Ok(())
    }

    #[test]
    fn empty_cart_summarises_to_no_lines() -> TestResult {
        let products = catalog::builtin()?;
        let summary = OrderSummary::for_products(&products, &weekday()?)?;

        assert!(summary.lines().is_empty());
        assert_eq!(summary.totals().total_quantity, 0);

        Ok(())
    }

    #[test]
    fn rendered_receipt_contains_lines_and_totals() -> TestResult {
        let summary = populated_summary()?;

        let mut buffer = Vec::new();
        summary.write_to(&mut buffer)?;

        let rendered = String::from_utf8(buffer)?;

        assert!(rendered.contains("Old Fashioned"), "missing cart line");
        assert!(rendered.contains("Subtotal:"), "missing totals block");
        assert!(rendered.contains("Total:"), "missing grand total");

        Ok(())
    }
}
