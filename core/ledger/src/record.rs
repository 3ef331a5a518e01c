//! FILENAME: core/ledger/src/record.rs
//! Order-line records: the raw shape handed over by the loader and the
//! validated shape every roll-up consumes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::money::Amount;
use crate::timestamp::parse_timestamp;

// ============================================================================
// STATUS ENUMS
// ============================================================================

/// Lifecycle status of the order a line belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Created,
    Approved,
    Invoiced,
    Processing,
    Shipped,
    Delivered,
    Canceled,
    Unavailable,
    /// Any status string the ledger uses that is not listed above.
    Other(String),
}

impl OrderStatus {
    /// Case-insensitive parse of a ledger status string. Never fails:
    /// unrecognised values are kept as `Other`.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => OrderStatus::Created,
            "approved" => OrderStatus::Approved,
            "invoiced" => OrderStatus::Invoiced,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "canceled" | "cancelled" => OrderStatus::Canceled,
            "unavailable" => OrderStatus::Unavailable,
            _ => OrderStatus::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Approved => "approved",
            OrderStatus::Invoiced => "invoiced",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Unavailable => "unavailable",
            OrderStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, OrderStatus::Canceled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Delivered
    }
}

/// Delivery punctuality, derived upstream from estimated vs. actual
/// delivery dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    OnTime,
    Late,
    Unknown,
}

impl DeliveryStatus {
    /// Parses a delivery status string. Blank input means the field is
    /// absent and yields None; unrecognised text yields `Unknown`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" => None,
            "late" => Some(DeliveryStatus::Late),
            "on time" | "on-time" | "on_time" | "ontime" => Some(DeliveryStatus::OnTime),
            _ => Some(DeliveryStatus::Unknown),
        }
    }

    pub fn is_late(self) -> bool {
        self == DeliveryStatus::Late
    }
}

// ============================================================================
// ORDER LINE RECORD
// ============================================================================

/// One order-item line. Immutable once it reaches the roll-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    /// Not unique: an order with several items has several lines.
    pub order_id: String,
    pub customer_id: String,
    pub product_id: String,
    pub product_category: Option<String>,
    pub order_status: OrderStatus,
    pub payment_value: Amount,
    /// Wall-clock purchase time, never time-zone converted.
    pub purchase_timestamp: NaiveDateTime,
    pub seller_city: String,
    pub customer_city: String,
    pub customer_state: String,
    pub delivery_status: Option<DeliveryStatus>,
}

impl OrderLineRecord {
    /// Creates a delivered line with no category, location or delivery data.
    /// Use the `with_*` methods to fill in the rest.
    pub fn new(
        order_id: impl Into<String>,
        customer_id: impl Into<String>,
        purchase_timestamp: NaiveDateTime,
        payment_value: Amount,
    ) -> Self {
        OrderLineRecord {
            order_id: order_id.into(),
            customer_id: customer_id.into(),
            product_id: String::new(),
            product_category: None,
            order_status: OrderStatus::default(),
            payment_value,
            purchase_timestamp,
            seller_city: String::new(),
            customer_city: String::new(),
            customer_state: String::new(),
            delivery_status: None,
        }
    }

    pub fn with_product(mut self, product_id: impl Into<String>, category: Option<&str>) -> Self {
        self.product_id = product_id.into();
        self.product_category = category.map(str::to_string);
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.order_status = status;
        self
    }

    pub fn with_customer_location(
        mut self,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        self.customer_city = city.into();
        self.customer_state = state.into();
        self
    }

    pub fn with_seller_city(mut self, city: impl Into<String>) -> Self {
        self.seller_city = city.into();
        self
    }

    pub fn with_delivery(mut self, status: Option<DeliveryStatus>) -> Self {
        self.delivery_status = status;
        self
    }

    /// Calendar day of the purchase in the record's own wall-clock.
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_timestamp.date()
    }

    pub fn category(&self) -> Option<&str> {
        self.product_category.as_deref()
    }
}

// ============================================================================
// RAW ORDER LINE
// ============================================================================

/// An order line as the external loader produces it, before validation.
/// Column names follow the ledger's own headers so CSV/JSON rows
/// deserialize directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOrderLine {
    pub order_id: String,
    pub customer_id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default, alias = "product_category_name")]
    pub product_category: Option<String>,
    #[serde(default)]
    pub order_status: String,
    pub payment_value: f64,
    #[serde(alias = "order_purchase_timestamp")]
    pub purchase_timestamp: String,
    #[serde(default)]
    pub seller_city: String,
    #[serde(default)]
    pub customer_city: String,
    #[serde(default)]
    pub customer_state: String,
    #[serde(default)]
    pub delivery_status: Option<String>,
}

impl RawOrderLine {
    /// Validates the line. A malformed timestamp or an invalid payment
    /// value rejects the whole line.
    pub fn validate(self) -> Result<OrderLineRecord, LedgerError> {
        let purchase_timestamp = parse_timestamp(&self.purchase_timestamp)?;
        let payment_value = Amount::from_f64(self.payment_value)
            .ok_or(LedgerError::InvalidPaymentValue(self.payment_value))?;

        Ok(OrderLineRecord {
            order_id: self.order_id,
            customer_id: self.customer_id,
            product_id: self.product_id,
            product_category: non_blank(self.product_category),
            order_status: OrderStatus::parse(&self.order_status),
            payment_value,
            purchase_timestamp,
            seller_city: self.seller_city,
            customer_city: self.customer_city,
            customer_state: self.customer_state,
            delivery_status: self.delivery_status.as_deref().and_then(DeliveryStatus::parse),
        })
    }
}

/// Blank optional text is treated as missing.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
