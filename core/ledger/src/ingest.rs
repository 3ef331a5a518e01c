//! FILENAME: core/ledger/src/ingest.rs
//! The validated ledger snapshot handed to the roll-ups.
//!
//! Ingestion rejects lines individually: one malformed timestamp never
//! fails the batch. Rejected lines are collected once, with the reason, so
//! the caller can surface them next to the roll-up results.

use std::borrow::Cow;

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::range::DateRange;
use crate::record::{OrderLineRecord, RawOrderLine};

/// A raw line that did not make it into the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// 0-based position of the line in the raw input.
    pub row: usize,
    pub order_id: String,
    pub reason: LedgerError,
}

/// Immutable set of validated order lines, held in purchase order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<OrderLineRecord>,
    skipped: Vec<SkippedRecord>,
}

impl Ledger {
    /// Wraps already-validated records. The sort is stable, so lines with
    /// equal timestamps keep their input order.
    pub fn new(mut records: Vec<OrderLineRecord>) -> Self {
        records.sort_by_key(|r| r.purchase_timestamp);
        Ledger {
            records,
            skipped: Vec::new(),
        }
    }

    /// Validates raw lines, keeping the good ones and recording the rest.
    pub fn from_raw<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawOrderLine>,
    {
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for (row, raw) in rows.into_iter().enumerate() {
            let order_id = raw.order_id.clone();
            match raw.validate() {
                Ok(record) => records.push(record),
                Err(reason) => {
                    warn!("skipping ledger row {} (order {}): {}", row, order_id, reason);
                    skipped.push(SkippedRecord { row, order_id, reason });
                }
            }
        }

        info!(
            "ledger ingested: {} records accepted, {} skipped",
            records.len(),
            skipped.len()
        );

        let mut ledger = Ledger::new(records);
        ledger.skipped = skipped;
        ledger
    }

    pub fn records(&self) -> &[OrderLineRecord] {
        &self.records
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last purchase day over the whole ledger. The dashboard
    /// offers this as the default selection.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.purchase_date();
        let last = self.records.last()?.purchase_date();
        Some((first, last))
    }

    /// Same as `date_bounds`, as a ready-made range.
    pub fn full_range(&self) -> Option<DateRange> {
        let (first, last) = self.date_bounds()?;
        DateRange::new(first, last).ok()
    }

    /// Records whose purchase day lies inside `range`, in purchase order.
    pub fn filter(&self, range: &DateRange) -> Vec<OrderLineRecord> {
        self.records
            .iter()
            .filter(|r| range.contains(&r.purchase_timestamp))
            .cloned()
            .collect()
    }

    /// The record set a roll-up run works on: the whole ledger when no range
    /// is given (borrowed), otherwise the filtered copy.
    pub fn select(&self, range: Option<&DateRange>) -> Cow<'_, [OrderLineRecord]> {
        match range {
            Some(range) => Cow::Owned(self.filter(range)),
            None => Cow::Borrowed(&self.records),
        }
    }
}
