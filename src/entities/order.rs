use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::cart::CartLine;

/// Enum representing the possible statuses of an order.
///
/// The lifecycle is strictly forward, one stage at a time:
/// `Pending -> Preparing -> Ready -> Delivered`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    /// The next stage in the lifecycle, if any.
    pub fn successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Adjacency table for the order state machine.
    ///
    /// Re-requesting the current status is legal and treated as an idempotent
    /// no-op by the ledger; everything else must be the immediate successor.
    pub fn can_transition_to(self, requested: OrderStatus) -> bool {
        requested == self || Some(requested) == self.successor()
    }
}

/// Payment method classification. The core never settles payments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    Card,
}

/// Payment details collected at checkout.
///
/// Card fields are free text with no validation or settlement; the order
/// itself only records the [`PaymentMethod`] tag. The full details are handed
/// to the notification collaborator once and never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentDetails {
    Pix {
        key: String,
    },
    Card {
        number: String,
        holder: String,
        expiry: String,
        cvv: String,
    },
}

impl PaymentDetails {
    /// The method tag recorded on the order.
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Pix { .. } => PaymentMethod::Pix,
            PaymentDetails::Card { .. } => PaymentMethod::Card,
        }
    }
}

/// How the customer receives the order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliveryChoice {
    Pickup,
    Delivery { address: String },
}

impl DeliveryChoice {
    /// The delivery address, when this is a delivery order.
    pub fn address(&self) -> Option<&str> {
        match self {
            DeliveryChoice::Pickup => None,
            DeliveryChoice::Delivery { address } => Some(address),
        }
    }
}

/// Customer contact snapshot embedded into an order.
///
/// Copied from the acting customer at creation time, not referenced: later
/// profile edits do not rewrite history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomerInfo {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Customer phone is required"))]
    pub phone: String,
    pub address: String,
}

/// An order held by the ledger.
///
/// Append-only: created once, mutated only through status transitions, never
/// deleted. The line items are a deep snapshot of the cart at creation time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier, generated at creation time.
    pub id: Uuid,

    /// Human-facing order number, derived from the creation instant.
    pub number: String,

    /// Snapshot of the cart lines at creation.
    pub lines: Vec<CartLine>,

    /// Customer contact snapshot.
    pub customer: CustomerInfo,

    /// Payment method tag.
    pub payment_method: PaymentMethod,

    /// Delivery fee charged on this order (zero for pickup).
    pub delivery_fee: Decimal,

    /// Total amount: line subtotal plus delivery fee. Computed by the ledger.
    pub total: Decimal,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Timestamp when the order was created.
    pub created_at: DateTime<Utc>,

    /// Timestamp when the order was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Line subtotal, excluding the delivery fee.
    pub fn subtotal(&self) -> Decimal {
        super::cart::lines_subtotal(&self.lines)
    }

    /// Records a status already vetted by the ledger and bumps `updated_at`.
    pub(crate) fn record_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
