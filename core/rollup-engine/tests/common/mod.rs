//! FILENAME: tests/common/mod.rs
//! Ledger fixtures for rollup-engine integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use ledger::{Amount, DeliveryStatus, Ledger, OrderLineRecord, OrderStatus, RawOrderLine};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    day(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

/// The three-line ledger used throughout the dashboard walkthrough:
/// one two-line toy order for X on Jan 1st, one cancelled book order for Y
/// on Jan 3rd.
pub struct WalkthroughFixture;

impl WalkthroughFixture {
    pub fn records() -> Vec<OrderLineRecord> {
        vec![
            OrderLineRecord::new("A", "X", at(2024, 1, 1, 10, 0), Amount::from_cents(1000))
                .with_product("p-1", Some("toys")),
            OrderLineRecord::new("A", "X", at(2024, 1, 1, 10, 0), Amount::from_cents(500))
                .with_product("p-2", Some("toys")),
            OrderLineRecord::new("B", "Y", at(2024, 1, 3, 14, 30), Amount::from_cents(2000))
                .with_product("p-3", Some("books"))
                .with_status(OrderStatus::Canceled),
        ]
    }

    pub fn ledger() -> Ledger {
        Ledger::new(Self::records())
    }
}

/// A small marketplace ledger in the shape the loader produces, with a few
/// rows that fail validation.
pub struct MarketplaceFixture;

impl MarketplaceFixture {
    /// (order, customer, category, status, value, timestamp, seller city,
    ///  customer city, state, delivery)
    #[rustfmt::skip]
    pub fn data() -> Vec<(
        &'static str,
        &'static str,
        Option<&'static str>,
        &'static str,
        f64,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        Option<&'static str>,
    )> {
        vec![
            ("o-001", "c-ana", Some("bed_bath_table"), "delivered", 89.90, "2017-11-02 09:12:00", "sao paulo", "sao paulo", "SP", Some("on time")),
            ("o-001", "c-ana", Some("bed_bath_table"), "delivered", 45.10, "2017-11-02 09:12:00", "sao paulo", "sao paulo", "SP", Some("on time")),
            ("o-002", "c-bruno", Some("health_beauty"), "delivered", 120.00, "2017-11-02 18:40:00", "curitiba", "rio de janeiro", "RJ", Some("late")),
            ("o-003", "c-carla", Some("sports_leisure"), "canceled", 35.50, "2017-11-04 11:00:00", "curitiba", "belo horizonte", "MG", None),
            ("o-004", "c-ana", Some("health_beauty"), "shipped", 60.00, "2017-11-05 20:15:00", "ibitinga", "sao paulo", "SP", Some("late")),
            ("o-005", "c-diego", None, "delivered", 15.00, "2017-11-05 21:00:00", "ibitinga", "campinas", "SP", Some("late")),
            ("o-006", "c-elisa", Some("sports_leisure"), "canceled", 250.00, "2017-11-07 08:00:00", "sao paulo", "rio de janeiro", "RJ", Some("")),
            ("o-007", "c-bruno", Some("toys"), "delivered", 42.00, "2017-11-07 23:59:00", "santos", "rio de janeiro", "RJ", Some("on time")),
            ("o-bad", "c-zed", Some("toys"), "delivered", 10.00, "2017-11-31 10:00:00", "santos", "santos", "SP", None),
            ("o-neg", "c-zed", Some("toys"), "delivered", -5.00, "2017-11-06 10:00:00", "santos", "santos", "SP", None),
        ]
    }

    pub fn raw_lines() -> Vec<RawOrderLine> {
        Self::data()
            .into_iter()
            .map(|(order, customer, category, status, value, ts, seller, city, state, delivery)| {
                RawOrderLine {
                    order_id: order.to_string(),
                    customer_id: customer.to_string(),
                    product_id: format!("prod-{}", order),
                    product_category: category.map(str::to_string),
                    order_status: status.to_string(),
                    payment_value: value,
                    purchase_timestamp: ts.to_string(),
                    seller_city: seller.to_string(),
                    customer_city: city.to_string(),
                    customer_state: state.to_string(),
                    delivery_status: delivery.map(str::to_string),
                }
            })
            .collect()
    }

    pub fn ledger() -> Ledger {
        Ledger::from_raw(Self::raw_lines())
    }
}

/// Builds a late line for the given seller city.
pub fn late_line(order: &str, seller_city: &str, ts: NaiveDateTime) -> OrderLineRecord {
    OrderLineRecord::new(order, "c-late", ts, Amount::from_cents(100))
        .with_seller_city(seller_city)
        .with_delivery(Some(DeliveryStatus::Late))
}
