//! Order Pricing
//!
//! Pure derivation of checkout totals from cart state. Totals are
//! recomputed on every read and never cached.

use decimal_percentage::Percentage;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::cart::Cart;

/// Subtotal above which shipping is free. The comparison is strictly
/// greater than; an order of exactly this amount still pays shipping.
pub const FREE_SHIPPING_THRESHOLD_MINOR: i64 = 50_00;

/// Flat shipping surcharge for orders at or below the free threshold.
pub const FLAT_SHIPPING_MINOR: i64 = 10_00;

/// Sales tax fraction applied to the subtotal. Shipping is not taxed.
#[must_use]
pub fn tax_rate() -> Percentage {
    Percentage::from(0.10)
}

/// Derived checkout totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals<'a> {
    /// Sum of price times quantity over all lines
    pub subtotal: Money<'a, Currency>,

    /// Flat surcharge, or zero when free (or when the cart is empty)
    pub shipping: Money<'a, Currency>,

    /// Sales tax on the subtotal
    pub tax: Money<'a, Currency>,

    /// Subtotal plus shipping plus tax
    pub total: Money<'a, Currency>,
}

impl<'a> OrderTotals<'a> {
    /// Compute totals for the current cart state.
    ///
    /// Shipping is zero for an empty cart, zero when the subtotal is
    /// strictly greater than the free threshold, and the flat surcharge
    /// otherwise. Tax is applied to the subtotal only.
    #[must_use]
    pub fn for_cart(cart: &Cart<'a>) -> Self {
        let currency = cart.currency();
        let subtotal_minor = cart.subtotal().to_minor_units();

        let shipping_minor = if cart.is_empty() {
            0
        } else if subtotal_minor > FREE_SHIPPING_THRESHOLD_MINOR {
            0
        } else {
            FLAT_SHIPPING_MINOR
        };

        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);
        let tax_minor = (tax_rate() * subtotal_dec).round_dp(0).to_i64().unwrap_or(0);

        let total_minor = subtotal_minor
            .saturating_add(shipping_minor)
            .saturating_add(tax_minor);

        OrderTotals {
            subtotal: Money::from_minor(subtotal_minor, currency),
            shipping: Money::from_minor(shipping_minor, currency),
            tax: Money::from_minor(tax_minor, currency),
            total: Money::from_minor(total_minor, currency),
        }
    }

    /// Whether the order ships free of charge.
    #[must_use]
    pub fn shipping_is_free(&self) -> bool {
        self.shipping.to_minor_units() == 0
    }

    /// Amount still needed to reach free shipping, shown as the
    /// "add more for free shipping" hint. `Some` exactly when shipping is
    /// being charged; at a subtotal of exactly the threshold the gap is
    /// zero, matching the storefront's rendering.
    #[must_use]
    pub fn free_shipping_gap(&self) -> Option<Money<'a, Currency>> {
        if self.shipping_is_free() {
            return None;
        }

        let gap_minor = FREE_SHIPPING_THRESHOLD_MINOR - self.subtotal.to_minor_units();

        Some(Money::from_minor(gap_minor.max(0), self.subtotal.currency()))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rustc_hash::FxHashMap;
    use rusty_money::iso::USD;
    use slotmap::SlotMap;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::products::{Product, ProductKey};

    use super::*;

    fn cart_with_subtotal(subtotal_minor: i64) -> Result<Cart<'static>, crate::cart::CartError> {
        let mut keys: SlotMap<ProductKey, ()> = SlotMap::with_key();
        let mut cart = Cart::new(USD);

        let product = Product {
            name: "Item".to_string(),
            brand: "Brand".to_string(),
            category: "Misc".to_string(),
            price: Money::from_minor(subtotal_minor, USD),
            original_price: None,
            in_stock: true,
            rating: Decimal::new(40, 1),
            reviews: 1,
            description: String::new(),
            images: smallvec![],
            specifications: FxHashMap::default(),
        };

        cart.add_item(keys.insert(()), &product, 1)?;

        Ok(cart)
    }

    #[test]
    fn empty_cart_has_all_zero_totals() {
        let cart = Cart::new(USD);
        let totals = OrderTotals::for_cart(&cart);

        assert_eq!(totals.subtotal, Money::from_minor(0, USD));
        assert_eq!(totals.shipping, Money::from_minor(0, USD));
        assert_eq!(totals.tax, Money::from_minor(0, USD));
        assert_eq!(totals.total, Money::from_minor(0, USD));
        assert!(totals.shipping_is_free());
        assert!(totals.free_shipping_gap().is_none());
    }

    #[test]
    fn subtotal_above_threshold_ships_free() -> TestResult {
        let cart = cart_with_subtotal(60_00)?;
        let totals = OrderTotals::for_cart(&cart);

        assert_eq!(totals.shipping, Money::from_minor(0, USD));
        assert_eq!(totals.tax, Money::from_minor(6_00, USD));
        assert_eq!(totals.total, Money::from_minor(66_00, USD));
        assert!(totals.shipping_is_free());

        Ok(())
    }

    #[test]
    fn subtotal_at_threshold_still_pays_shipping() -> TestResult {
        // The threshold comparison is strict: exactly 50.00 is not free.
        let cart = cart_with_subtotal(50_00)?;
        let totals = OrderTotals::for_cart(&cart);

        assert_eq!(totals.shipping, Money::from_minor(10_00, USD));
        assert_eq!(totals.tax, Money::from_minor(5_00, USD));
        assert_eq!(totals.total, Money::from_minor(65_00, USD));

        Ok(())
    }

    #[test]
    fn one_cent_over_threshold_ships_free() -> TestResult {
        let cart = cart_with_subtotal(50_01)?;
        let totals = OrderTotals::for_cart(&cart);

        assert!(totals.shipping_is_free());

        Ok(())
    }

    #[test]
    fn shipping_is_not_taxed() -> TestResult {
        let cart = cart_with_subtotal(20_00)?;
        let totals = OrderTotals::for_cart(&cart);

        // 10% of 20.00, not of 30.00
        assert_eq!(totals.tax, Money::from_minor(2_00, USD));
        assert_eq!(totals.total, Money::from_minor(32_00, USD));

        Ok(())
    }

    #[test]
    fn tax_rounds_to_whole_minor_units() -> TestResult {
        let cart = cart_with_subtotal(10_99)?;
        let totals = OrderTotals::for_cart(&cart);

        // 10% of 10.99 is 1.099, carried as 1.10 in minor units.
        assert_eq!(totals.tax, Money::from_minor(1_10, USD));

        Ok(())
    }

    #[test]
    fn free_shipping_gap_is_threshold_minus_subtotal() -> TestResult {
        let cart = cart_with_subtotal(40_00)?;
        let totals = OrderTotals::for_cart(&cart);

        assert_eq!(totals.free_shipping_gap(), Some(Money::from_minor(10_00, USD)));

        Ok(())
    }

    #[test]
    fn free_shipping_gap_at_threshold_is_zero() -> TestResult {
        let cart = cart_with_subtotal(50_00)?;
        let totals = OrderTotals::for_cart(&cart);

        assert_eq!(totals.free_shipping_gap(), Some(Money::from_minor(0, USD)));

        Ok(())
    }

    #[test]
    fn free_shipping_gap_absent_when_free() -> TestResult {
        let cart = cart_with_subtotal(75_00)?;
        let totals = OrderTotals::for_cart(&cart);

        assert!(totals.free_shipping_gap().is_none());

        Ok(())
    }

    #[test]
    fn totals_are_recomputed_from_current_state() -> TestResult {
        let mut keys: SlotMap<ProductKey, ()> = SlotMap::with_key();
        let key = keys.insert(());
        let mut cart = Cart::new(USD);

        let product = Product {
            name: "Item".to_string(),
            brand: "Brand".to_string(),
            category: "Misc".to_string(),
            price: Money::from_minor(30_00, USD),
            original_price: None,
            in_stock: true,
            rating: Decimal::new(40, 1),
            reviews: 1,
            description: String::new(),
            images: smallvec![],
            specifications: FxHashMap::default(),
        };

        cart.add_item(key, &product, 1)?;

        assert_eq!(
            OrderTotals::for_cart(&cart).shipping,
            Money::from_minor(10_00, USD)
        );

        cart.update_quantity(key, 2);

        // 60.00 now clears the threshold.
        assert!(OrderTotals::for_cart(&cart).shipping_is_free());

        Ok(())
    }
}
