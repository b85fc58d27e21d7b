//! Fixtures
//!
//! YAML-backed demo data: the product catalog (with its categories) and
//! the static order history. Fixture sets live under `./fixtures` and are
//! addressed by name, e.g. the shipped `shop` set.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::{Catalog, Category},
    fixtures::{orders::OrdersFixture, products::ProductsFixture},
    orders::{OrderHistory, OrderRecord},
    products::{Product, ProductKey},
    session::Session,
};

pub mod orders;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A reference price below the selling price (product name)
    #[error("Reference price is below the selling price for product: {0}")]
    OriginalPriceBelowPrice(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order not found
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Currency mismatch within the fixture set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog construction error
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog, created when the first product is loaded
    catalog: Option<Catalog<'a>>,

    /// String key -> catalog key mapping for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Static order history
    order_history: OrderHistory<'a>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with the default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            product_keys: FxHashMap::default(),
            order_history: OrderHistory::default(),
        }
    }

    /// Load products (and their categories) from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if prices
    /// are malformed, or if currencies are inconsistent.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for product_fixture in fixture.products {
            // Parse to get the currency first, before converting the record.
            let (_minor_units, currency) = products::parse_price(&product_fixture.price)?;

            if self.catalog.is_none() {
                self.catalog = Some(Catalog::new(currency));
            }

            let catalog = self.catalog.as_mut().ok_or(FixtureError::NoCurrency)?;

            if catalog.currency() != currency {
                return Err(FixtureError::CurrencyMismatch(
                    catalog.currency().iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }

            let key_str = product_fixture.key.clone();
            let product: Product<'a> = product_fixture.try_into()?;
            let product_key = catalog.insert(product)?;

            self.product_keys.insert(key_str, product_key);
        }

        if let Some(catalog) = self.catalog.as_mut() {
            for category in fixture.categories {
                catalog.add_category(Category {
                    name: category.name,
                    icon: category.icon,
                });
            }
        }

        Ok(self)
    }

    /// Load the static order history from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// order total uses a different currency than the catalog.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrdersFixture = serde_norway::from_str(&contents)?;

        let mut records = Vec::with_capacity(fixture.orders.len());

        for order in fixture.orders {
            let (total_minor, currency) = products::parse_price(&order.total)?;

            if let Some(catalog) = self.catalog.as_ref()
                && catalog.currency() != currency
            {
                return Err(FixtureError::CurrencyMismatch(
                    catalog.currency().iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }

            records.push(OrderRecord {
                id: order.id,
                customer: order.customer,
                date: order.date,
                total: Money::from_minor(total_minor, currency),
                status: order.status,
                items: order.items,
                tracking: order.tracking,
            });
        }

        self.order_history = OrderHistory::new(records);

        Ok(self)
    }

    /// Load a complete fixture set (products and orders with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_orders(name)?;

        Ok(fixture)
    }

    /// Get the loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn catalog(&self) -> Result<&Catalog<'a>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCurrency)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, FixtureError> {
        let product_key = self.product_key(key)?;

        self.catalog()?
            .get(product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a catalog key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get the loaded order history
    #[must_use]
    pub fn orders(&self) -> &OrderHistory<'a> {
        &self.order_history
    }

    /// Get an order by id
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found.
    pub fn order(&self, id: &str) -> Result<&OrderRecord<'a>, FixtureError> {
        self.order_history
            .get(id)
            .ok_or_else(|| FixtureError::OrderNotFound(id.to_string()))
    }

    /// Get the fixture set's currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        Ok(self.catalog()?.currency())
    }

    /// Start a new session priced in the fixture set's currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn session(&self) -> Result<Session<'a>, FixtureError> {
        Ok(Session::new(self.currency()?))
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::orders::OrderStatus;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_the_shop_set() -> TestResult {
        let fixture = Fixture::from_set("shop")?;
        let catalog = fixture.catalog()?;

        assert!(catalog.len() >= 10, "shop set should carry a full catalog");
        assert!(!catalog.categories().is_empty());
        assert_eq!(fixture.currency()?, USD);

        let headphones = fixture.product("wireless-headphones")?;

        assert_eq!(headphones.name, "Wireless Bluetooth Headphones");
        assert_eq!(headphones.price, Money::from_minor(79_99, USD));
        assert!(headphones.is_on_sale());

        Ok(())
    }

    #[test]
    fn fixture_orders_match_the_account_page() -> TestResult {
        let fixture = Fixture::from_set("shop")?;

        assert_eq!(fixture.orders().len(), 3);

        let order = fixture.order("ORD001")?;

        assert_eq!(order.total, Money::from_minor(299_99, USD));
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.items, 3);

        Ok(())
    }

    #[test]
    fn fixture_session_uses_the_catalog_currency() -> TestResult {
        let fixture = Fixture::from_set("shop")?;
        let session = fixture.session()?;

        assert_eq!(session.cart().currency(), USD);
        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn fixture_product_not_found_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.product("nonexistent");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(_))));
    }

    #[test]
    fn fixture_order_not_found_returns_error() -> TestResult {
        let fixture = Fixture::from_set("shop")?;
        let result = fixture.order("ORD999");

        assert!(matches!(result, Err(FixtureError::OrderNotFound(_))));

        Ok(())
    }

    #[test]
    fn fixture_no_products_means_no_currency() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.currency(), Err(FixtureError::NoCurrency)));
        assert!(matches!(fixture.session(), Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn fixture_rejects_currency_mismatch_across_product_files() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "usd_set",
            "products:\n  - key: apple\n    name: Apple\n    brand: Fresh\n    category: Grocery\n    price: 1.00 USD\n    rating: 4.0\n    reviews: 5\n",
        )?;

        write_fixture(
            dir.path(),
            "products",
            "gbp_set",
            "products:\n  - key: banana\n    name: Banana\n    brand: Fresh\n    category: Grocery\n    price: 1.00 GBP\n    rating: 4.0\n    reviews: 5\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("usd_set")?;

        let result = fixture.load_products("gbp_set");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_rejects_reference_price_below_selling_price() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "bad",
            "products:\n  - key: lamp\n    name: Lamp\n    brand: BrightCo\n    category: Home\n    price: 30.00 USD\n    original_price: 20.00 USD\n    rating: 4.0\n    reviews: 5\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        let result = fixture.load_products("bad");

        assert!(matches!(
            result,
            Err(FixtureError::OriginalPriceBelowPrice(_))
        ));

        Ok(())
    }

    #[test]
    fn fixture_rejects_order_currency_mismatch() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "mixed",
            "products:\n  - key: apple\n    name: Apple\n    brand: Fresh\n    category: Grocery\n    price: 1.00 USD\n    rating: 4.0\n    reviews: 5\n",
        )?;

        write_fixture(
            dir.path(),
            "orders",
            "mixed",
            "orders:\n  - id: ORD001\n    customer: John Doe\n    date: \"2024-01-15\"\n    total: 299.99 GBP\n    status: delivered\n    items: 3\n    tracking: TRK123456789\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("mixed")?;

        let result = fixture.load_orders("mixed");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_missing_file_returns_io_error() {
        let mut fixture = Fixture::with_base_path("./does-not-exist");

        let result = fixture.load_products("shop");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn fixture_default_matches_new() {
        let fixture = Fixture::default();

        assert_eq!(fixture.base_path, PathBuf::from("./fixtures"));
        assert!(fixture.product_keys.is_empty());
        assert!(fixture.order_history.is_empty());
    }
}
