//! Catalog
//!
//! The fixed, read-only set of purchasable products, plus the filtering
//! and sorting used by the browsing surfaces.

use std::cmp::Reverse;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductKey};

/// Errors related to catalog construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product's currency differs from the catalog currency (product name, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// A top-level browsing category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category name, also the value products reference in their `category` field
    pub name: String,

    /// Display icon (an emoji in the shipped fixture set)
    pub icon: String,
}

/// Sort order for catalog listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Most reviewed first (the storefront default)
    #[default]
    Popularity,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,

    /// Newest arrivals first (reverse catalog order)
    Newest,

    /// Highest rated first
    Rating,
}

/// Filter and sort criteria for a catalog listing.
///
/// All filters are optional; an empty query matched against the catalog
/// returns every product in popularity order.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery<'a> {
    /// Exact category name to match
    pub category: Option<String>,

    /// Case-insensitive substring matched against name, description and brand
    pub search: Option<String>,

    /// Lower price bound, inclusive
    pub min_price: Option<Money<'a, Currency>>,

    /// Upper price bound, inclusive
    pub max_price: Option<Money<'a, Currency>>,

    /// Brand names to include; empty means no brand constraint
    pub brands: Vec<String>,

    /// Minimum-rating thresholds; a product matches when its rating
    /// reaches any of them. Empty means no rating constraint.
    pub min_ratings: Vec<Decimal>,

    /// Sort order for the result
    pub sort: SortBy,
}

impl<'a> ProductQuery<'a> {
    fn matches(&self, product: &Product<'a>) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();

            let hit = product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
                || product.brand.to_lowercase().contains(&needle);

            if !hit {
                return false;
            }
        }

        let price_minor = product.price.to_minor_units();

        if let Some(min) = self.min_price
            && price_minor < min.to_minor_units()
        {
            return false;
        }

        if let Some(max) = self.max_price
            && price_minor > max.to_minor_units()
        {
            return false;
        }

        if !self.brands.is_empty() && !self.brands.contains(&product.brand) {
            return false;
        }

        if !self.min_ratings.is_empty()
            && !self.min_ratings.iter().any(|threshold| product.rating >= *threshold)
        {
            return false;
        }

        true
    }
}

/// Catalog
///
/// Insertion-ordered product store. Populated once at load time; the
/// engine only ever reads from it afterwards.
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    order: Vec<ProductKey>,
    categories: Vec<Category>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create a new empty catalog priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            products: SlotMap::with_key(),
            order: Vec::new(),
            categories: Vec::new(),
            currency,
        }
    }

    /// Insert a product and return its key.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::CurrencyMismatch`] if the product's price
    /// (or reference price) is not in the catalog currency.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        let price_currency = product.price.currency();

        if price_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.name,
                price_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(original) = product.original_price {
            let original_currency = original.currency();

            if original_currency != self.currency {
                return Err(CatalogError::CurrencyMismatch(
                    product.name,
                    original_currency.iso_alpha_code,
                    self.currency.iso_alpha_code,
                ));
            }
        }

        let key = self.products.insert(product);

        self.order.push(key);

        Ok(key)
    }

    /// Register a browsing category.
    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Look up a product by key.
    #[must_use]
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Iterate over all products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.order
            .iter()
            .filter_map(|key| self.products.get(*key).map(|product| (*key, product)))
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get the currency all products are priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Registered browsing categories, in registration order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Unique brand names in first-seen order, for the brand filter list.
    #[must_use]
    pub fn brands(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut brands = Vec::new();

        for (_, product) in self.iter() {
            if seen.insert(product.brand.clone()) {
                brands.push(product.brand.clone());
            }
        }

        brands
    }

    /// The highest product price, used as the price-filter ceiling.
    #[must_use]
    pub fn max_price(&self) -> Money<'a, Currency> {
        let minor = self
            .iter()
            .map(|(_, product)| product.price.to_minor_units())
            .max()
            .unwrap_or(0);

        Money::from_minor(minor, self.currency)
    }

    /// The first `n` products, shown as the featured strip.
    #[must_use]
    pub fn featured(&self, n: usize) -> Vec<(ProductKey, &Product<'a>)> {
        self.iter().take(n).collect()
    }

    /// The first `n` discounted products, shown as deals of the day.
    #[must_use]
    pub fn deals(&self, n: usize) -> Vec<(ProductKey, &Product<'a>)> {
        self.iter()
            .filter(|(_, product)| product.is_on_sale())
            .take(n)
            .collect()
    }

    /// Up to `n` other products in the same category, for the related
    /// strip on a product page. Empty when the key is unknown.
    #[must_use]
    pub fn related(&self, key: ProductKey, n: usize) -> Vec<(ProductKey, &Product<'a>)> {
        let Some(product) = self.get(key) else {
            return Vec::new();
        };

        self.iter()
            .filter(|(other_key, other)| *other_key != key && other.category == product.category)
            .take(n)
            .collect()
    }

    /// Filter and sort the catalog for a listing page.
    #[must_use]
    pub fn search(&self, query: &ProductQuery<'a>) -> Vec<(ProductKey, &Product<'a>)> {
        let mut result: Vec<(ProductKey, &Product<'a>)> = self
            .iter()
            .filter(|(_, product)| query.matches(product))
            .collect();

        match query.sort {
            SortBy::PriceLow => {
                result.sort_by_key(|(_, product)| product.price.to_minor_units());
            }
            SortBy::PriceHigh => {
                result.sort_by_key(|(_, product)| Reverse(product.price.to_minor_units()));
            }
            SortBy::Rating => {
                result.sort_by_key(|(_, product)| Reverse(product.rating));
            }
            SortBy::Newest => {
                result.reverse();
            }
            SortBy::Popularity => {
                result.sort_by_key(|(_, product)| Reverse(product.reviews));
            }
        }

        result
    }
}
