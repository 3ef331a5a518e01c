//! FILENAME: core/rollup-engine/src/engine.rs
//! Rollup Engine - The seven transforms and the pipeline that runs them.
//!
//! Every transform takes the (already windowed) record snapshot and returns
//! one derived table. Transforms share no state and never touch their input,
//! so the pipeline can run them in any order or all at once.
//!
//! Ordering contract:
//! - daily orders: day ascending
//! - category, cancelled, city and late-city tables: count descending,
//!   ties by key ascending
//! - customer states: group-discovery order (unsorted)
//! - customer RFM: customer id ascending

use chrono::{NaiveDate, NaiveDateTime};
use ledger::{Amount, Ledger, OrderLineRecord};
use log::debug;

use crate::definition::RollupDefinition;
use crate::group::{by_count_desc, count_distinct, count_rows, DistinctSet, GroupIndex};
use crate::view::{
    CancelledProductVolume, CustomerCityCount, CustomerRfm, CustomerStateCount,
    DailyOrderSummary, LateDeliveryCityVolume, ProductCategoryVolume, RollupReport,
};

// ============================================================================
// ACCUMULATORS
// ============================================================================

#[derive(Debug, Default)]
struct DayAccumulator<'a> {
    orders: DistinctSet<'a>,
    revenue: Amount,
}

#[derive(Debug, Default)]
struct CustomerAccumulator<'a> {
    orders: DistinctSet<'a>,
    monetary: Amount,
    last_purchase: Option<NaiveDateTime>,
}

/// Groups `keys` by row count and ranks them (count desc, key asc).
fn ranked_row_counts<'a, I>(keys: I) -> Vec<(&'a str, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut rows = count_rows(keys).into_groups();
    rows.sort_by(|a, b| by_count_desc(*a, *b));
    rows
}

// ============================================================================
// TIME SERIES
// ============================================================================

/// Distinct orders and line revenue per purchase day. Days without purchases
/// are omitted; see `fill_daily_gaps` for a dense series.
pub fn daily_order_summary(records: &[OrderLineRecord]) -> Vec<DailyOrderSummary> {
    let mut days: GroupIndex<NaiveDate, DayAccumulator> = GroupIndex::new();

    for record in records {
        let day = days.entry(record.purchase_date());
        day.orders.insert(record.order_id.as_str());
        day.revenue += record.payment_value;
    }

    let mut rows: Vec<DailyOrderSummary> = days
        .into_groups()
        .into_iter()
        .map(|(day, acc)| DailyOrderSummary {
            day,
            order_count: acc.orders.count(),
            revenue: acc.revenue,
        })
        .collect();
    rows.sort_by_key(|row| row.day);

    debug!("daily_order_summary: {} records -> {} days", records.len(), rows.len());
    rows
}

/// Expands a sparse daily series (one row per day, as returned by
/// `daily_order_summary`) into one row per day from the first to the last
/// day, inserting zero rows for days without purchases. Input order does
/// not matter.
pub fn fill_daily_gaps(rows: &[DailyOrderSummary]) -> Vec<DailyOrderSummary> {
    let mut sorted: Vec<&DailyOrderSummary> = rows.iter().collect();
    sorted.sort_by_key(|row| row.day);

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };

    let span = (last.day - first.day).num_days() as usize + 1;
    let mut dense = Vec::with_capacity(span);
    let mut present = sorted.iter().copied().peekable();
    let mut day = first.day;

    while day <= last.day {
        match present.peek() {
            Some(row) if row.day == day => {
                dense.push((*row).clone());
                present.next();
            }
            _ => dense.push(DailyOrderSummary::empty(day)),
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    dense
}

// ============================================================================
// CATEGORY VOLUME
// ============================================================================

/// Order lines per product category. Lines without a category are left out.
pub fn product_category_volume(records: &[OrderLineRecord]) -> Vec<ProductCategoryVolume> {
    let rows: Vec<ProductCategoryVolume> =
        ranked_row_counts(records.iter().filter_map(OrderLineRecord::category))
            .into_iter()
            .map(|(category, line_count)| ProductCategoryVolume {
                category: category.to_string(),
                line_count,
            })
            .collect();

    debug!("product_category_volume: {} records -> {} categories", records.len(), rows.len());
    rows
}

/// Cancelled order lines per product category.
pub fn cancelled_product_volume(records: &[OrderLineRecord]) -> Vec<CancelledProductVolume> {
    let cancelled = records
        .iter()
        .filter(|r| r.order_status.is_canceled())
        .filter_map(OrderLineRecord::category);

    let rows: Vec<CancelledProductVolume> = ranked_row_counts(cancelled)
        .into_iter()
        .map(|(category, cancelled_count)| CancelledProductVolume {
            category: category.to_string(),
            cancelled_count,
        })
        .collect();

    debug!("cancelled_product_volume: {} records -> {} categories", records.len(), rows.len());
    rows
}

// ============================================================================
// GEOGRAPHY
// ============================================================================

/// Distinct customers per customer city.
pub fn customer_city_count(records: &[OrderLineRecord]) -> Vec<CustomerCityCount> {
    let pairs = records
        .iter()
        .map(|r| (r.customer_city.as_str(), r.customer_id.as_str()));

    let mut counts: Vec<(&str, u64)> = count_distinct(pairs)
        .into_groups()
        .into_iter()
        .map(|(city, customers)| (city, customers.count()))
        .collect();
    counts.sort_by(|a, b| by_count_desc(*a, *b));

    let rows: Vec<CustomerCityCount> = counts
        .into_iter()
        .map(|(city, customer_count)| CustomerCityCount {
            city: city.to_string(),
            customer_count,
        })
        .collect();

    debug!("customer_city_count: {} records -> {} cities", records.len(), rows.len());
    rows
}

/// Distinct customers per customer state, in the order states first appear
/// in the input. Callers wanting a ranking sort the result themselves.
pub fn customer_state_count(records: &[OrderLineRecord]) -> Vec<CustomerStateCount> {
    let pairs = records
        .iter()
        .map(|r| (r.customer_state.as_str(), r.customer_id.as_str()));

    let rows: Vec<CustomerStateCount> = count_distinct(pairs)
        .into_groups()
        .into_iter()
        .map(|(state, customers)| CustomerStateCount {
            state: state.to_string(),
            customer_count: customers.count(),
        })
        .collect();

    debug!("customer_state_count: {} records -> {} states", records.len(), rows.len());
    rows
}

/// Late-delivered order lines per seller city. Lines with no delivery
/// status are left out.
pub fn late_delivery_city_volume(records: &[OrderLineRecord]) -> Vec<LateDeliveryCityVolume> {
    let late = records
        .iter()
        .filter(|r| r.delivery_status.is_some_and(|s| s.is_late()))
        .map(|r| r.seller_city.as_str());

    let rows: Vec<LateDeliveryCityVolume> = ranked_row_counts(late)
        .into_iter()
        .map(|(seller_city, late_count)| LateDeliveryCityVolume {
            seller_city: seller_city.to_string(),
            late_count,
        })
        .collect();

    debug!("late_delivery_city_volume: {} records -> {} cities", records.len(), rows.len());
    rows
}

// ============================================================================
// RFM SEGMENTATION
// ============================================================================

/// Recency, frequency and monetary value per customer.
///
/// Recency counts days back from the last purchase day of the given record
/// set, not from today: the same window always yields the same figures, and
/// narrowing the window moves the reference day with it.
pub fn customer_rfm(records: &[OrderLineRecord]) -> Vec<CustomerRfm> {
    let Some(global_max_date) = records.iter().map(OrderLineRecord::purchase_date).max() else {
        return Vec::new();
    };

    let mut customers: GroupIndex<&str, CustomerAccumulator> = GroupIndex::new();
    for record in records {
        let customer = customers.entry(record.customer_id.as_str());
        customer.orders.insert(record.order_id.as_str());
        customer.monetary += record.payment_value;
        customer.last_purchase = customer.last_purchase.max(Some(record.purchase_timestamp));
    }

    let mut rows: Vec<CustomerRfm> = customers
        .into_groups()
        .into_iter()
        .filter_map(|(customer_id, acc)| {
            let last_purchase_date = acc.last_purchase?.date();
            Some(CustomerRfm {
                customer_id: customer_id.to_string(),
                last_purchase_date,
                recency: (global_max_date - last_purchase_date).num_days().max(0) as u64,
                frequency: acc.orders.count(),
                monetary: acc.monetary,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.customer_id.cmp(&b.customer_id));

    debug!(
        "customer_rfm: {} records -> {} customers (reference day {})",
        records.len(),
        rows.len(),
        global_max_date
    );
    rows
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Runs every transform over one record snapshot and collects the tables.
pub fn calculate_rollups(records: &[OrderLineRecord], parallel: bool) -> RollupReport {
    let (
        (daily_orders, (category_volume, cancelled_products)),
        ((customer_cities, customer_states), (late_delivery_cities, customer_rfm)),
    ) = if parallel {
        rayon::join(
            || {
                rayon::join(
                    || daily_order_summary(records),
                    || {
                        rayon::join(
                            || product_category_volume(records),
                            || cancelled_product_volume(records),
                        )
                    },
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || customer_city_count(records),
                            || customer_state_count(records),
                        )
                    },
                    || {
                        rayon::join(
                            || late_delivery_city_volume(records),
                            || customer_rfm(records),
                        )
                    },
                )
            },
        )
    } else {
        (
            (
                daily_order_summary(records),
                (product_category_volume(records), cancelled_product_volume(records)),
            ),
            (
                (customer_city_count(records), customer_state_count(records)),
                (late_delivery_city_volume(records), customer_rfm(records)),
            ),
        )
    };

    RollupReport {
        date_range: None,
        record_count: records.len(),
        skipped: Vec::new(),
        daily_orders,
        category_volume,
        customer_cities,
        customer_states,
        cancelled_products,
        late_delivery_cities,
        customer_rfm,
    }
}

/// Pipeline entry point: selects the definition's window from the ledger,
/// runs the seven roll-ups and attaches the ingestion skip list.
pub fn run_pipeline(ledger: &Ledger, definition: &RollupDefinition) -> RollupReport {
    let records = ledger.select(definition.date_range.as_ref());

    debug!(
        "run_pipeline: {} of {} records in window {:?} (parallel={})",
        records.len(),
        ledger.len(),
        definition.date_range,
        definition.parallel
    );

    let mut report = calculate_rollups(&records, definition.parallel);
    report.date_range = definition.date_range;
    report.skipped = ledger.skipped().to_vec();
    report
}
