//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{fixtures::FixtureError, products::Product};

/// Wrapper for the products file in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Browsing categories, in display order
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,

    /// Products, in catalog order
    pub products: Vec<ProductFixture>,
}

/// Category Fixture
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category name
    pub name: String,

    /// Display icon
    pub icon: String,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// String key the fixture set refers to this product by
    pub key: String,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Category name
    pub category: String,

    /// Selling price (e.g., "79.99 USD")
    pub price: String,

    /// Pre-discount reference price, same format
    #[serde(default)]
    pub original_price: Option<String>,

    /// Stock flag, defaults to in stock
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    /// Average rating
    pub rating: Decimal,

    /// Review count
    pub reviews: u32,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Image references
    #[serde(default)]
    pub images: Vec<String>,

    /// Specification mapping
    #[serde(default)]
    pub specifications: FxHashMap<String, String>,
}

fn default_in_stock() -> bool {
    true
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (price_minor, currency) = parse_price(&fixture.price)?;
        let price = Money::from_minor(price_minor, currency);

        let original_price = match fixture.original_price.as_deref() {
            Some(raw) => {
                let (original_minor, original_currency) = parse_price(raw)?;

                if original_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        original_currency.iso_alpha_code.to_string(),
                    ));
                }

                if original_minor < price_minor {
                    return Err(FixtureError::OriginalPriceBelowPrice(fixture.name));
                }

                Some(Money::from_minor(original_minor, currency))
            }
            None => None,
        };

        Ok(Product {
            name: fixture.name,
            brand: fixture.brand,
            category: fixture.category,
            price,
            original_price,
            in_stock: fixture.in_stock,
            rating: fixture.rating,
            reviews: fixture.reviews,
            description: fixture.description,
            images: SmallVec::from_vec(fixture.images),
            specifications: fixture.specifications,
        })
    }
}

/// Parse a price string (e.g., "79.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
