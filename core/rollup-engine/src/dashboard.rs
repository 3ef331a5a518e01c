//! FILENAME: core/rollup-engine/src/dashboard.rs
//! Dashboard projection of a rollup report.
//!
//! Everything here reads a finished `RollupReport` and derives what the
//! dashboard panels show: headline totals, top/bottom slices, RFM averages
//! and shortened customer labels. Aggregation is already complete at this
//! point, so truncating customer ids can never merge two customers.

use std::cmp::Ordering;

use ledger::Amount;
use serde::{Deserialize, Serialize};

use crate::definition::RollupDefinition;
use crate::group::{by_count_asc, by_count_desc};
use crate::view::{
    CancelledProductVolume, CustomerCityCount, CustomerRfm, CustomerStateCount,
    LateDeliveryCityVolume, ProductCategoryVolume, RollupReport,
};

// ============================================================================
// PROJECTED ROWS
// ============================================================================

/// One customer in an RFM ranking, with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerHighlight {
    /// Last characters of the customer id.
    pub customer_label: String,
    pub customer_id: String,
    pub recency: u64,
    pub frequency: u64,
    pub monetary: Amount,
}

/// Average RFM figures across all customers in the window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RfmSummary {
    /// Days, rounded to one decimal.
    pub avg_recency: Option<f64>,
    /// Orders, rounded to two decimals.
    pub avg_frequency: Option<f64>,
    pub avg_monetary: Option<f64>,
}

/// Everything the dashboard renders for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub total_orders: u64,
    pub total_revenue: Amount,

    pub best_categories: Vec<ProductCategoryVolume>,
    pub worst_categories: Vec<ProductCategoryVolume>,

    pub top_customer_cities: Vec<CustomerCityCount>,
    pub customer_states_by_count: Vec<CustomerStateCount>,

    pub top_cancelled_categories: Vec<CancelledProductVolume>,
    pub top_late_seller_cities: Vec<LateDeliveryCityVolume>,

    pub rfm_summary: RfmSummary,
    pub best_by_recency: Vec<CustomerHighlight>,
    pub best_by_frequency: Vec<CustomerHighlight>,
    pub best_by_monetary: Vec<CustomerHighlight>,
}

// ============================================================================
// PROJECTION
// ============================================================================

impl DashboardView {
    pub fn from_report(report: &RollupReport, definition: &RollupDefinition) -> Self {
        let top_n = &definition.top_n;
        let label_len = definition.customer_label_len;

        let total_orders: u64 = report.daily_orders.iter().map(|d| d.order_count).sum();
        let total_revenue: Amount = report.daily_orders.iter().map(|d| d.revenue).sum();

        let mut worst_categories = report.category_volume.clone();
        worst_categories.sort_by(|a, b| {
            by_count_asc((a.category.as_str(), a.line_count), (b.category.as_str(), b.line_count))
        });
        worst_categories.truncate(top_n.categories);

        let mut customer_states_by_count = report.customer_states.clone();
        customer_states_by_count.sort_by(|a, b| {
            by_count_desc(
                (a.state.as_str(), a.customer_count),
                (b.state.as_str(), b.customer_count),
            )
        });

        let customers = &report.customer_rfm;

        DashboardView {
            total_orders,
            total_revenue,
            best_categories: head(&report.category_volume, top_n.categories),
            worst_categories,
            top_customer_cities: head(&report.customer_cities, top_n.customer_cities),
            customer_states_by_count,
            top_cancelled_categories: head(&report.cancelled_products, top_n.cancelled_categories),
            top_late_seller_cities: head(&report.late_delivery_cities, top_n.late_seller_cities),
            rfm_summary: summarize_rfm(&report.customer_rfm),
            best_by_recency: rank_customers(customers, top_n.customers, label_len, |a, b| {
                a.recency.cmp(&b.recency)
            }),
            best_by_frequency: rank_customers(customers, top_n.customers, label_len, |a, b| {
                b.frequency.cmp(&a.frequency)
            }),
            best_by_monetary: rank_customers(customers, top_n.customers, label_len, |a, b| {
                b.monetary.cmp(&a.monetary)
            }),
        }
    }
}

/// Keeps the last `len` characters of a customer id. A `len` of 0, or an id
/// no longer than `len`, keeps the whole id.
pub fn customer_label(customer_id: &str, len: usize) -> &str {
    if len == 0 {
        return customer_id;
    }
    match customer_id.char_indices().rev().nth(len - 1) {
        Some((start, _)) => &customer_id[start..],
        None => customer_id,
    }
}

/// Mean recency, frequency and monetary value. All None for an empty table.
pub fn summarize_rfm(rows: &[CustomerRfm]) -> RfmSummary {
    if rows.is_empty() {
        return RfmSummary::default();
    }
    let n = rows.len() as f64;
    let recency: u64 = rows.iter().map(|r| r.recency).sum();
    let frequency: u64 = rows.iter().map(|r| r.frequency).sum();
    let monetary: Amount = rows.iter().map(|r| r.monetary).sum();

    RfmSummary {
        avg_recency: Some(round_to(recency as f64 / n, 1)),
        avg_frequency: Some(round_to(frequency as f64 / n, 2)),
        avg_monetary: Some(monetary.as_f64() / n),
    }
}

fn head<T: Clone>(rows: &[T], n: usize) -> Vec<T> {
    rows.iter().take(n).cloned().collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Sorts customers by `order` (ties by full id ascending) and keeps the
/// first `n`, labelled for display.
fn rank_customers<F>(
    rows: &[CustomerRfm],
    n: usize,
    label_len: usize,
    order: F,
) -> Vec<CustomerHighlight>
where
    F: Fn(&CustomerRfm, &CustomerRfm) -> Ordering,
{
    let mut ranked: Vec<&CustomerRfm> = rows.iter().collect();
    ranked.sort_by(|a, b| order(*a, *b).then_with(|| a.customer_id.cmp(&b.customer_id)));

    ranked
        .into_iter()
        .take(n)
        .map(|r| CustomerHighlight {
            customer_label: customer_label(&r.customer_id, label_len).to_string(),
            customer_id: r.customer_id.clone(),
            recency: r.recency,
            frequency: r.frequency,
            monetary: r.monetary,
        })
        .collect()
}
