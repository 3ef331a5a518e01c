//! FILENAME: core/rollup-engine/src/view.rs
//! Rollup View - The derived tables.
//!
//! One row type per derived table, plus the report that carries all seven
//! tables of a single run. Rows are plain data: they are rebuilt from the
//! ledger on every run and never updated in place.

use chrono::NaiveDate;
use ledger::{Amount, DateRange, SkippedRecord};
use serde::{Deserialize, Serialize};

// ============================================================================
// ROW TYPES
// ============================================================================

/// Orders and revenue for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOrderSummary {
    pub day: NaiveDate,
    /// Distinct orders purchased that day.
    pub order_count: u64,
    /// Line-level payment total for the day.
    pub revenue: Amount,
}

impl DailyOrderSummary {
    /// A day with no purchases, used when densifying the series.
    pub fn empty(day: NaiveDate) -> Self {
        DailyOrderSummary {
            day,
            order_count: 0,
            revenue: Amount::ZERO,
        }
    }
}

/// Order lines sold per product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategoryVolume {
    pub category: String,
    pub line_count: u64,
}

/// Distinct customers per customer city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCityCount {
    pub city: String,
    pub customer_count: u64,
}

/// Distinct customers per customer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerStateCount {
    pub state: String,
    pub customer_count: u64,
}

/// Cancelled order lines per product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledProductVolume {
    pub category: String,
    pub cancelled_count: u64,
}

/// Late-delivered order lines per seller city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateDeliveryCityVolume {
    pub seller_city: String,
    pub late_count: u64,
}

/// Recency / frequency / monetary figures for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRfm {
    /// Full identifier. Display truncation happens in the dashboard
    /// projection only.
    pub customer_id: String,
    pub last_purchase_date: NaiveDate,
    /// Days between the window's last purchase day and this customer's.
    pub recency: u64,
    /// Distinct orders.
    pub frequency: u64,
    pub monetary: Amount,
}

// ============================================================================
// ROLLUP REPORT
// ============================================================================

/// Every derived table of one pipeline run. Each table is computed
/// independently from the same record snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupReport {
    /// Window the run was restricted to, if any.
    pub date_range: Option<DateRange>,
    /// Records inside the window.
    pub record_count: usize,
    /// Lines rejected at ingestion.
    pub skipped: Vec<SkippedRecord>,

    pub daily_orders: Vec<DailyOrderSummary>,
    pub category_volume: Vec<ProductCategoryVolume>,
    pub customer_cities: Vec<CustomerCityCount>,
    pub customer_states: Vec<CustomerStateCount>,
    pub cancelled_products: Vec<CancelledProductVolume>,
    pub late_delivery_cities: Vec<LateDeliveryCityVolume>,
    pub customer_rfm: Vec<CustomerRfm>,
}
