//! FILENAME: core/ledger/src/error.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerError {
    #[error("Malformed purchase timestamp: {0:?}")]
    MalformedTimestamp(String),

    #[error("Invalid payment value: {0}")]
    InvalidPaymentValue(f64),

    #[error("Inverted date range: {start} is after {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid rollup definition: {0}")]
    InvalidDefinition(String),
}
