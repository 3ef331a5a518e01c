//! FILENAME: core/ledger/src/range.rs
//! Inclusive calendar-day window used to select ledger records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Closed interval `[start, end]` of purchase days. A record is inside when
/// the calendar day of its purchase timestamp falls in the interval, so the
/// whole of `end` is included regardless of time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeRepr")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unvalidated wire form; deserialization goes through `DateRange::new`.
#[derive(Deserialize)]
struct DateRangeRepr {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateRangeRepr> for DateRange {
    type Error = LedgerError;

    fn try_from(repr: DateRangeRepr) -> Result<Self, Self::Error> {
        DateRange::new(repr.start, repr.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if start > end {
            return Err(LedgerError::InvertedRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        DateRange { start: day, end: day }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains_date(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        self.contains_date(timestamp.date())
    }

    /// Number of calendar days covered, counting both ends.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
