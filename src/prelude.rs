//! Gottfrid prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calendar::Calendar,
    cart::{Cart, CartError, SortKey},
    catalog::{CatalogError, builtin},
    delivery::DeliveryEstimate,
    order::{OrderError, OrderTotals, compute_order_totals},
    pricing::{BULK_THRESHOLD, LinePrice, PricingError, compute_line_price},
    products::{Category, ImageRef, Product, ProductError},
    summary::{OrderSummary, SummaryError, SummaryLine},
};
