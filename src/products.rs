//! Products
//!
//! Catalog records for the storefront: immutable shelf data plus the mutable
//! cart quantity, which only moves through the clamped mutators.

use std::fmt;

use clap::ValueEnum;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::pricing::round_to_whole;

/// Multiplier applied to the shelf price to derive the bulk unit price.
const BULK_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Rating granularity; shelf ratings move in half-star steps.
const RATING_STEP: f32 = 0.5;

/// Errors raised when constructing a product record.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// Product ids are positive; zero is reserved.
    #[error("product id must be positive")]
    InvalidId,

    /// Shelf prices are positive whole kronor.
    #[error("price must be a positive whole amount, got {0}")]
    InvalidPrice(String),

    /// Ratings live in `0..=5` in half-star steps.
    #[error("rating must be between 0 and 5 in steps of 0.5, got {0}")]
    InvalidRating(f32),
}

/// Shelf category for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Plain ring donuts.
    Classics,

    /// Filled donuts from the standard range.
    FilledFavorites,

    /// Filled donuts from the premium range.
    FilledPremium,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Classics => "Klassiker",
            Category::FilledFavorites => "Fyllda Favoriter",
            Category::FilledPremium => "Fyllda Premium",
        })
    }
}

/// Image metadata carried with each product. Pure data; the engine never
/// loads or renders images.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    /// Relative asset path.
    pub src: String,

    /// Alt text for the image.
    pub alt: String,
}

/// A catalog product: immutable shelf fields plus the cart quantity.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Stable identity key, unique within a catalog.
    pub id: u32,

    /// Shelf category.
    pub category: Category,

    /// Display name.
    pub name: String,

    /// Display description.
    pub description: String,

    /// Primary and secondary product images.
    pub images: [ImageRef; 2],

    /// Shelf rating, `0..=5` in half-star steps.
    pub rating: f32,

    /// Shelf unit price, whole kronor.
    pub price: Money<'a, Currency>,

    /// Bulk unit price for quantities of ten or more, fixed at
    /// construction as `round(price * 0.9)`.
    pub bulk_price: Money<'a, Currency>,

    /// Cart quantity; never negative, mutated only through the clamped
    /// mutators below.
    amount: u32,
}

impl<'a> Product<'a> {
    /// Create a product record, deriving the bulk unit price from the shelf
    /// price. The cart quantity starts at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the id is zero, the price is not a
    /// positive whole amount, or the rating is outside `0..=5` or off the
    /// half-star grid.
    pub fn new(
        id: u32,
        category: Category,
        name: impl Into<String>,
        rating: f32,
        description: impl Into<String>,
        price: Money<'a, Currency>,
        images: [ImageRef; 2],
    ) -> Result<Self, ProductError> {
        if id == 0 {
            return Err(ProductError::InvalidId);
        }

        let shelf = *price.amount();

        if shelf <= Decimal::ZERO || shelf.fract() != Decimal::ZERO {
            return Err(ProductError::InvalidPrice(price.to_string()));
        }

        if !(0.0..=5.0).contains(&rating) || (rating / RATING_STEP).fract().abs() > f32::EPSILON {
            return Err(ProductError::InvalidRating(rating));
        }

        let bulk = shelf
            .checked_mul(BULK_RATE)
            .map(round_to_whole)
            .ok_or_else(|| ProductError::InvalidPrice(price.to_string()))?;

        Ok(Product {
            id,
            category,
            name: name.into(),
            description: description.into(),
            images,
            rating,
            price,
            bulk_price: Money::from_decimal(bulk, price.currency()),
            amount: 0,
        })
    }

    /// Current cart quantity.
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Add one to the cart quantity.
    pub fn increment_amount(&mut self) -> u32 {
        self.amount = self.amount.saturating_add(1);
        self.amount
    }

    /// Remove one from the cart quantity, clamped at zero.
    pub fn decrement_amount(&mut self) -> u32 {
        self.amount = self.amount.saturating_sub(1);
        self.amount
    }

    /// Clear the cart quantity.
    pub fn reset_amount(&mut self) {
        self.amount = 0;
    }

    /// Set the cart quantity outright.
    pub fn set_amount(&mut self, amount: u32) {
        self.amount = amount;
    }
}
