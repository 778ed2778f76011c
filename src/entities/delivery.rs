use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Enum representing the possible statuses of a delivery assignment.
///
/// Distinct from [`super::order::OrderStatus`]: these are courier sub-states
/// layered on top of an order that is already `Ready`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    PickingUp,
    OnTheWay,
    Delivered,
}

impl AssignmentStatus {
    /// The next stage in the courier lifecycle, if any.
    pub fn successor(self) -> Option<AssignmentStatus> {
        match self {
            AssignmentStatus::Assigned => Some(AssignmentStatus::PickingUp),
            AssignmentStatus::PickingUp => Some(AssignmentStatus::OnTheWay),
            AssignmentStatus::OnTheWay => Some(AssignmentStatus::Delivered),
            AssignmentStatus::Delivered => None,
        }
    }

    /// Adjacency table for the assignment state machine; same rules as the
    /// order ledger (immediate successor, or idempotent same-state).
    pub fn can_transition_to(self, requested: AssignmentStatus) -> bool {
        requested == self || Some(requested) == self.successor()
    }
}

/// A courier assignment for a ready order.
///
/// References the order by id; it does not own the order. Reaching
/// `Delivered` forces the referenced order to its own terminal status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAssignment {
    /// Synthetic assignment identifier.
    pub id: Uuid,

    /// The order being delivered.
    pub order_id: Uuid,

    /// Courier name.
    pub courier_name: String,

    /// Courier contact phone.
    pub courier_phone: String,

    /// Free-text estimated delivery time, e.g. "30 minutos".
    pub estimated_time: String,

    /// Current courier lifecycle status.
    pub status: AssignmentStatus,

    /// Timestamp when the courier was assigned.
    pub assigned_at: DateTime<Utc>,
}

impl DeliveryAssignment {
    /// Creates a new assignment in the `Assigned` state.
    pub fn new(
        order_id: Uuid,
        courier_name: impl Into<String>,
        courier_phone: impl Into<String>,
        estimated_time: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            courier_name: courier_name.into(),
            courier_phone: courier_phone.into(),
            estimated_time: estimated_time.into(),
            status: AssignmentStatus::Assigned,
            assigned_at: Utc::now(),
        }
    }
}
