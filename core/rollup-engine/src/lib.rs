//! FILENAME: core/rollup-engine/src/lib.rs
//! Dashboard roll-ups over the order ledger.
//!
//! This crate turns a window of validated order lines (see the `ledger`
//! crate) into the fixed set of summary tables the dashboard shows. It is
//! not a query engine: the seven roll-ups are the whole surface.
//!
//! Layers:
//! - `definition`: Serializable configuration (which window, how many rows)
//! - `group`: Grouping and ranking primitives (HOW we aggregate)
//! - `engine`: The seven transforms and the pipeline entry point
//! - `view`: Derived table rows and the per-run report (WHAT we compute)
//! - `dashboard`: Display projection of a report (WHAT we show)

pub mod dashboard;
pub mod definition;
pub mod engine;
mod group;
pub mod view;

pub use dashboard::{customer_label, summarize_rfm, CustomerHighlight, DashboardView, RfmSummary};
pub use definition::{RollupDefinition, TopN, DEFAULT_CUSTOMER_LABEL_LEN};
pub use engine::{
    calculate_rollups, cancelled_product_volume, customer_city_count, customer_rfm,
    customer_state_count, daily_order_summary, fill_daily_gaps, late_delivery_city_volume,
    product_category_volume, run_pipeline,
};
pub use view::*;
