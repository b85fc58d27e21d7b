//! ShopHub prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, MAX_LINE_QUANTITY},
    catalog::{Catalog, CatalogError, Category, ProductQuery, SortBy},
    checkout::{
        CheckoutError, CheckoutForm, Country, PaymentMethod, PlacedOrder, ShippingAddress,
        place_order,
    },
    fixtures::{Fixture, FixtureError},
    orders::{OrderHistory, OrderRecord, OrderStatus, StepState, TimelineStep},
    pricing::{FLAT_SHIPPING_MINOR, FREE_SHIPPING_THRESHOLD_MINOR, OrderTotals, tax_rate},
    products::{Product, ProductKey},
    receipt::{SummaryError, write_order_summary, write_product_table},
    session::{AuthError, DEMO_EMAIL, DEMO_PASSWORD, Session, User},
};
