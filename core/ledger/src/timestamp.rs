//! FILENAME: core/ledger/src/timestamp.rs
//! Purchase timestamp parsing.
//!
//! Timestamps are kept as the record's own wall-clock time. Offsets on
//! RFC 3339 input are dropped rather than converted, so a purchase made at
//! 23:30 local time always lands on that local calendar day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::LedgerError;

/// Naive formats tried in order before falling back to RFC 3339 and
/// date-only input.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a raw purchase timestamp. Anything that is not a valid instant is
/// rejected with `MalformedTimestamp`; nothing is coerced.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MalformedTimestamp(raw.to_string()));
    }

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.naive_local());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(LedgerError::MalformedTimestamp(raw.to_string()))
}
