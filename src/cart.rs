//! Cart
//!
//! Session-scoped shopping cart. One line per distinct product; quantities
//! are clamped into `1..=MAX_LINE_QUANTITY` and every out-of-range or
//! unknown-identifier operation is a silent no-op rather than an error.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::products::{Product, ProductKey};

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 10;

/// Errors related to cart construction.
#[derive(Debug, Error)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product currency, cart currency).
    #[error("Product has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// One product-and-quantity pairing in a cart.
///
/// The line owns a snapshot of the product it was created from; later
/// catalog changes do not affect lines already in a cart.
#[derive(Debug, Clone)]
pub struct CartLine<'a> {
    product_id: ProductKey,
    product: Product<'a>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    /// Returns the catalog key of the product on this line.
    #[must_use]
    pub fn product_id(&self) -> ProductKey {
        self.product_id
    }

    /// Returns the product snapshot on this line.
    #[must_use]
    pub fn product(&self) -> &Product<'a> {
        &self.product
    }

    /// Returns the line quantity.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of the line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money<'a, Currency> {
        let minor = self
            .product
            .price
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity));

        Money::from_minor(minor, self.product.price.currency())
    }
}

/// Cart
///
/// Ordered sequence of cart lines, insertion order preserved. Created empty
/// per session and cleared on checkout completion or an explicit [`Cart::clear`].
#[derive(Debug)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add a product to the cart.
    ///
    /// If a line for the product already exists, its quantity grows by
    /// `quantity`, capped at [`MAX_LINE_QUANTITY`]. Otherwise a new line is
    /// appended with `quantity` clamped into `1..=MAX_LINE_QUANTITY`.
    /// Over-cap requests are silently capped.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if the product is priced
    /// in a different currency than the cart.
    pub fn add_item(
        &mut self,
        product_id: ProductKey,
        product: &Product<'a>,
        quantity: u32,
    ) -> Result<(), CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = line.quantity.saturating_add(quantity).min(MAX_LINE_QUANTITY);
        } else {
            self.lines.push(CartLine {
                product_id,
                product: product.clone(),
                quantity: quantity.clamp(1, MAX_LINE_QUANTITY),
            });
        }

        Ok(())
    }

    /// Remove the line for the given product. No-op when absent.
    pub fn remove_item(&mut self, product_id: ProductKey) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Set the quantity of an existing line.
    ///
    /// Quantities below 1 leave the line unchanged (the caller is expected
    /// to disable decrement below 1); quantities above the cap are clamped
    /// to [`MAX_LINE_QUANTITY`]. No-op when the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductKey, quantity: u32) {
        if quantity < 1 {
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = quantity.min(MAX_LINE_QUANTITY);
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Calculate the cart subtotal: the sum of price times quantity over
    /// all lines. Does not mutate the cart.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        let minor = self
            .lines
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.line_total().to_minor_units()));

        Money::from_minor(minor, self.currency)
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, product_id: ProductKey) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Number of lines (distinct products) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines, as shown on the header badge.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
