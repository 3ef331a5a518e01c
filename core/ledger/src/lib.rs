//! FILENAME: core/ledger/src/lib.rs
//! PURPOSE: Input contract for the dashboard roll-ups.
//! CONTEXT: Validated order-line records, payment amounts, timestamp parsing
//! and date-range selection, shared by every roll-up in `rollup-engine`.

mod error;
pub mod ingest;
pub mod money;
pub mod range;
pub mod record;
pub mod timestamp;

pub use error::LedgerError;
pub use ingest::{Ledger, SkippedRecord};
pub use money::Amount;
pub use range::DateRange;
pub use record::{DeliveryStatus, OrderLineRecord, OrderStatus, RawOrderLine};
pub use timestamp::parse_timestamp;
