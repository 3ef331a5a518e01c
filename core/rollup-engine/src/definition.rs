//! FILENAME: core/rollup-engine/src/definition.rs
//! Rollup Definition - The serializable configuration.
//!
//! Describes one dashboard run: which window of the ledger to aggregate and
//! how much of each table the presentation projection keeps. The window is
//! always passed in here, never held as ambient state.

use ledger::{DateRange, LedgerError};
use serde::{Deserialize, Serialize};

/// Characters of the customer id kept for display.
pub const DEFAULT_CUSTOMER_LABEL_LEN: usize = 10;

// ============================================================================
// TOP-N LIMITS
// ============================================================================

/// How many rows each dashboard panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopN {
    /// Best and worst performing categories (each).
    pub categories: usize,
    pub customer_cities: usize,
    pub cancelled_categories: usize,
    pub late_seller_cities: usize,
    /// Customers per RFM ranking.
    pub customers: usize,
}

impl Default for TopN {
    fn default() -> Self {
        TopN {
            categories: 5,
            customer_cities: 10,
            cancelled_categories: 5,
            late_seller_cities: 5,
            customers: 5,
        }
    }
}

// ============================================================================
// ROLLUP DEFINITION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollupDefinition {
    /// Inclusive purchase-day window. None aggregates the whole ledger.
    pub date_range: Option<DateRange>,

    /// Fan the seven roll-ups out over the rayon pool.
    pub parallel: bool,

    /// Suffix length for customer labels in the projection. 0 keeps the
    /// full identifier.
    pub customer_label_len: usize,

    pub top_n: TopN,
}

impl Default for RollupDefinition {
    fn default() -> Self {
        RollupDefinition {
            date_range: None,
            parallel: true,
            customer_label_len: DEFAULT_CUSTOMER_LABEL_LEN,
            top_n: TopN::default(),
        }
    }
}

impl RollupDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Loads a definition from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        serde_json::from_str(json).map_err(|e| LedgerError::InvalidDefinition(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::InvalidDefinition(e.to_string()))
    }
}
