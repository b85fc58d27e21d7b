//! Order Fixtures

use jiff::civil::Date;
use serde::Deserialize;

use crate::orders::OrderStatus;

/// Wrapper for the orders file in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Orders, newest first as the account page lists them
    pub orders: Vec<OrderFixture>,
}

/// Order Fixture
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Order id, e.g. `ORD001`
    pub id: String,

    /// Customer name
    pub customer: String,

    /// Date the order was placed
    pub date: Date,

    /// Amount charged (e.g., "299.99 USD")
    pub total: String,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Number of items in the order
    pub items: u32,

    /// Carrier tracking number
    pub tracking: String,
}
