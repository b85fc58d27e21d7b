//! Products

use rust_decimal::{Decimal, prelude::FromPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// A purchasable catalog record. Products are externally supplied and never
/// mutated by the engine.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Category name
    pub category: String,

    /// Current selling price
    pub price: Money<'a, Currency>,

    /// Pre-discount reference price. Always at least `price` when present.
    pub original_price: Option<Money<'a, Currency>>,

    /// Whether the product can currently be added to a cart
    pub in_stock: bool,

    /// Average review rating, e.g. 4.5
    pub rating: Decimal,

    /// Number of reviews behind the rating
    pub reviews: u32,

    /// Product description
    pub description: String,

    /// Image references
    pub images: SmallVec<[String; 4]>,

    /// Free-form specification mapping (label -> value)
    pub specifications: FxHashMap<String, String>,
}

impl Product<'_> {
    /// Whether the product carries a pre-discount reference price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some()
    }

    /// Discount against the reference price as whole percent points,
    /// rounded to the nearest integer. `None` when the product is not on
    /// sale or the reference price is zero.
    #[must_use]
    pub fn discount_percent(&self) -> Option<Decimal> {
        let original = self.original_price?;
        let original_minor = original.to_minor_units();

        if original_minor == 0 {
            return None;
        }

        let price_dec = Decimal::from_i64(self.price.to_minor_units()).unwrap_or(Decimal::ZERO);
        let original_dec = Decimal::from_i64(original_minor).unwrap_or(Decimal::ONE);
        let hundred = Decimal::from_i64(100).unwrap_or(Decimal::ZERO);

        Some((((original_dec - price_dec) / original_dec) * hundred).round_dp(0))
    }
}
