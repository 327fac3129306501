//! Catalog
//!
//! The built-in donut catalog. The data lives in a YAML fixture embedded at
//! compile time, so constructing the catalog never touches the filesystem;
//! parsing it is still fallible and every malformed record is rejected here,
//! before anything reaches the calculators.

use std::collections::HashSet;

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Category, ImageRef, Product, ProductError};

/// The embedded catalog fixture.
const DONUTS_YML: &str = include_str!("../fixtures/donuts.yml");

/// Catalog construction errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing error.
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A product id appeared twice.
    #[error("Duplicate product id: {0}")]
    DuplicateId(u32),

    /// Rejected product record.
    #[error(transparent)]
    Product(#[from] ProductError),
}

/// Wrapper for products in YAML.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    /// Product records in shelf order.
    products: Vec<ProductFixture>,
}

/// One product record as it appears in the fixture.
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: u32,
    category: Category,
    name: String,
    rating: f32,
    description: String,

    /// Price string, e.g. "15 SEK".
    price: String,

    first_image: ImageRef,
    second_image: ImageRef,
}

impl TryFrom<ProductFixture> for Product<'static> {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        Ok(Product::new(
            fixture.id,
            fixture.category,
            fixture.name,
            fixture.rating,
            fixture.description,
            price,
            [fixture.first_image, fixture.second_image],
        )?)
    }
}

/// Build the built-in catalog, every quantity at zero.
///
/// # Errors
///
/// Returns a [`CatalogError`] if the embedded fixture fails to parse, a
/// price string is malformed, an id repeats, or a record is rejected by
/// [`Product::new`].
pub fn builtin() -> Result<Vec<Product<'static>>, CatalogError> {
    let fixture: CatalogFixture = serde_norway::from_str(DONUTS_YML)?;

    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(fixture.products.len());

    for product_fixture in fixture.products {
        if !seen.insert(product_fixture.id) {
            return Err(CatalogError::DuplicateId(product_fixture.id));
        }

        products.push(Product::try_from(product_fixture)?);
    }

    Ok(products)
}

/// Parse a price string (e.g. "15 SEK") into a money value.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code is
/// not recognised.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "SEK" => iso::SEK,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    Ok(Money::from_decimal(amount, currency))
}
