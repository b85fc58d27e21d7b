//! Orders
//!
//! Static order history and the tracking timeline. There is no real
//! fulfilment backend; records are fixture data and the timeline is
//! derived from the recorded status.

use std::fmt;

use jiff::{ToSpan, civil::Date};
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use smallvec::{SmallVec, smallvec};

/// Days between order date and estimated delivery.
const DELIVERY_LEAD_DAYS: i64 = 5;

/// Fulfilment status of a past order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Being prepared for shipment
    Processing,

    /// Handed to the carrier
    Shipped,

    /// Arrived at the customer
    Delivered,
}

impl OrderStatus {
    /// Capitalized display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress state of one tracking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// The step has happened
    Complete,

    /// The order is currently at this step
    Current,

    /// The step has not happened yet
    Pending,
}

/// One entry in the order tracking timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep {
    /// Step heading
    pub label: &'static str,

    /// One-line description under the heading
    pub detail: &'static str,

    /// Where the order stands relative to this step
    pub state: StepState,
}

/// One entry in the static order history.
#[derive(Debug, Clone)]
pub struct OrderRecord<'a> {
    /// Order id, e.g. `ORD001`
    pub id: String,

    /// Customer name
    pub customer: String,

    /// Date the order was placed
    pub date: Date,

    /// Amount charged
    pub total: Money<'a, Currency>,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Number of items in the order
    pub items: u32,

    /// Carrier tracking number
    pub tracking: String,
}

impl OrderRecord<'_> {
    /// Estimated delivery date: five days after the order date.
    #[must_use]
    pub fn estimated_delivery(&self) -> Date {
        self.date
            .checked_add(DELIVERY_LEAD_DAYS.days())
            .unwrap_or(self.date)
    }

    /// The four-step tracking timeline for this order, derived from its
    /// status.
    #[must_use]
    pub fn timeline(&self) -> SmallVec<[TimelineStep; 4]> {
        let states: [StepState; 4] = match self.status {
            OrderStatus::Processing => [
                StepState::Complete,
                StepState::Current,
                StepState::Pending,
                StepState::Pending,
            ],
            OrderStatus::Shipped => [
                StepState::Complete,
                StepState::Complete,
                StepState::Current,
                StepState::Pending,
            ],
            OrderStatus::Delivered => [
                StepState::Complete,
                StepState::Complete,
                StepState::Complete,
                StepState::Complete,
            ],
        };

        let [confirmed, processing, transit, delivered] = states;

        smallvec![
            TimelineStep {
                label: "Order Confirmed",
                detail: "Your order has been received and confirmed.",
                state: confirmed,
            },
            TimelineStep {
                label: "Processing",
                detail: "Your order is being prepared for shipment.",
                state: processing,
            },
            TimelineStep {
                label: "In Transit",
                detail: "Your order is on its way and will arrive soon.",
                state: transit,
            },
            TimelineStep {
                label: "Delivered",
                detail: "Your order will be delivered on this date.",
                state: delivered,
            },
        ]
    }
}

/// Order History
#[derive(Debug, Default)]
pub struct OrderHistory<'a> {
    orders: Vec<OrderRecord<'a>>,
}

impl<'a> OrderHistory<'a> {
    /// Create a history from records, preserving their order.
    #[must_use]
    pub fn new(orders: Vec<OrderRecord<'a>>) -> Self {
        OrderHistory { orders }
    }

    /// Look up an order by id. Exact, case-sensitive match.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&OrderRecord<'a>> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Iterate over the records in history order.
    pub fn iter(&self) -> impl Iterator<Item = &OrderRecord<'a>> {
        self.orders.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn record(id: &str, status: OrderStatus) -> OrderRecord<'static> {
        OrderRecord {
            id: id.to_string(),
            customer: "John Doe".to_string(),
            date: date(2024, 1, 15),
            total: Money::from_minor(299_99, USD),
            status,
            items: 3,
            tracking: "TRK123456789".to_string(),
        }
    }

    #[test]
    fn estimated_delivery_is_five_days_out() {
        let order = record("ORD001", OrderStatus::Shipped);

        assert_eq!(order.estimated_delivery(), date(2024, 1, 20));
    }

    #[test]
    fn processing_order_is_current_at_step_two() {
        let order = record("ORD003", OrderStatus::Processing);
        let timeline = order.timeline();

        let states: Vec<StepState> = timeline.iter().map(|step| step.state).collect();

        assert_eq!(
            states,
            vec![
                StepState::Complete,
                StepState::Current,
                StepState::Pending,
                StepState::Pending
            ]
        );
    }

    #[test]
    fn shipped_order_is_current_in_transit() {
        let order = record("ORD002", OrderStatus::Shipped);
        let timeline = order.timeline();

        assert_eq!(timeline.get(2).map(|step| step.state), Some(StepState::Current));
        assert_eq!(timeline.get(3).map(|step| step.state), Some(StepState::Pending));
    }

    #[test]
    fn delivered_order_completes_every_step() {
        let order = record("ORD001", OrderStatus::Delivered);

        assert!(
            order
                .timeline()
                .iter()
                .all(|step| step.state == StepState::Complete),
            "all steps should be complete"
        );
    }

    #[test]
    fn timeline_labels_are_in_page_order() {
        let order = record("ORD001", OrderStatus::Delivered);

        let labels: Vec<&str> = order.timeline().iter().map(|step| step.label).collect();

        assert_eq!(
            labels,
            vec!["Order Confirmed", "Processing", "In Transit", "Delivered"]
        );
    }

    #[test]
    fn status_labels_are_capitalized() {
        assert_eq!(OrderStatus::Processing.label(), "Processing");
        assert_eq!(OrderStatus::Shipped.to_string(), "Shipped");
        assert_eq!(OrderStatus::Delivered.label(), "Delivered");
    }

    #[test]
    fn history_lookup_is_exact() -> TestResult {
        let history = OrderHistory::new(vec![
            record("ORD001", OrderStatus::Delivered),
            record("ORD002", OrderStatus::Shipped),
        ]);

        assert_eq!(history.len(), 2);

        let order = history.get("ORD002").ok_or("missing order")?;

        assert_eq!(order.status, OrderStatus::Shipped);
        assert!(history.get("ord002").is_none(), "lookup is case sensitive");
        assert!(history.get("ORD999").is_none());

        Ok(())
    }
}
