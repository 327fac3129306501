//! Cart
//!
//! The cart facade over the product list: id-keyed lookup and quantity
//! mutation, shelf filtering and sorting, and the entry points into the
//! order calculations. The whole catalog lives in the cart; a product "in"
//! the cart is simply one with a positive quantity.

use clap::ValueEnum;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::trace;

use crate::{
    calendar::Calendar,
    catalog::{self, CatalogError},
    order::{OrderError, OrderTotals, compute_order_totals},
    products::{Category, Product},
    summary::OrderSummary,
};

/// Errors related to cart construction or lookups.
#[derive(Debug, Error)]
pub enum CartError {
    /// A product's currency differs from the cart currency (index, product
    /// currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// No products were provided, so currency could not be determined.
    #[error("cannot build a cart with no products")]
    NoProducts,

    /// An id lookup missed.
    #[error("Product {0} not found")]
    ProductNotFound(u32),

    /// Wrapped catalog construction error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Sort orders for a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Alphabetically by name.
    Name,

    /// Cheapest first.
    Price,

    /// Highest rated first.
    Rating,
}

/// Cart
#[derive(Debug)]
pub struct Cart<'a> {
    products: Vec<Product<'a>>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create a cart over the given products.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the list is empty or a product is priced
    /// in a different currency than the first.
    pub fn new(products: Vec<Product<'a>>) -> Result<Self, CartError> {
        let currency = products
            .first()
            .ok_or(CartError::NoProducts)?
            .price
            .currency();

        products.iter().enumerate().try_for_each(|(i, product)| {
            let product_currency = product.price.currency();

            if product_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    i,
                    product_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Cart { products, currency })
    }

    /// Create a cart over the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the embedded catalog fails to parse.
    pub fn builtin() -> Result<Cart<'static>, CartError> {
        Cart::new(catalog::builtin()?)
    }

    /// All products, in shelf order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if no product has the id.
    pub fn product(&self, id: u32) -> Result<&Product<'a>, CartError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or(CartError::ProductNotFound(id))
    }

    /// Add one to a product's quantity, returning the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if no product has the id.
    pub fn increment(&mut self, id: u32) -> Result<u32, CartError> {
        let amount = self.product_mut(id)?.increment_amount();

        trace!(product_id = id, amount, "cart quantity changed");

        Ok(amount)
    }

    /// Remove one from a product's quantity, clamped at zero, returning the
    /// new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if no product has the id.
    pub fn decrement(&mut self, id: u32) -> Result<u32, CartError> {
        let amount = self.product_mut(id)?.decrement_amount();

        trace!(product_id = id, amount, "cart quantity changed");

        Ok(amount)
    }

    /// Clear a product's quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if no product has the id.
    pub fn reset(&mut self, id: u32) -> Result<(), CartError> {
        self.product_mut(id)?.reset_amount();

        trace!(product_id = id, amount = 0, "cart quantity changed");

        Ok(())
    }

    /// Set a product's quantity outright.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if no product has the id.
    pub fn set_amount(&mut self, id: u32, amount: u32) -> Result<(), CartError> {
        self.product_mut(id)?.set_amount(amount);

        trace!(product_id = id, amount, "cart quantity changed");

        Ok(())
    }

    /// Total number of items across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.products
            .iter()
            .fold(0, |acc, product| acc.saturating_add(product.amount()))
    }

    /// Products on one shelf, in shelf order.
    pub fn by_category(&self, category: Category) -> Vec<&Product<'a>> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// All products in the given sort order.
    pub fn sorted_by(&self, key: SortKey) -> Vec<&Product<'a>> {
        let mut listing: Vec<&Product<'a>> = self.products.iter().collect();

        sort_products(&mut listing, key);

        listing
    }

    /// Aggregate order totals for the current quantities.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the aggregation fails; the currency
    /// errors cannot occur for a cart since construction validates them.
    pub fn totals(&self, calendar: &Calendar) -> Result<OrderTotals<'a>, OrderError> {
        compute_order_totals(&self.products, calendar)
    }

    /// Build an order summary for the current quantities.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the aggregation fails.
    pub fn summary(&self, calendar: &Calendar) -> Result<OrderSummary<'a>, OrderError> {
        OrderSummary::for_products(&self.products, calendar)
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    fn product_mut(&mut self, id: u32) -> Result<&mut Product<'a>, CartError> {
        self.products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(CartError::ProductNotFound(id))
    }
}

/// Sort a product listing in place.
pub fn sort_products(products: &mut [&Product<'_>], key: SortKey) {
    match key {
        SortKey::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Price => products.sort_by(|a, b| a.price.amount().cmp(b.price.amount())),
        SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
}
