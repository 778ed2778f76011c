use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    entities::{AssignmentStatus, DeliveryAssignment, Order, OrderStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    notifications::CourierChannel,
    services::orders::OrderService,
};

/// Fallback estimated delivery time when the staff leaves the field blank.
const DEFAULT_ESTIMATED_TIME: &str = "30 minutos";

/// Input for assigning a courier to a ready order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignCourierInput {
    /// The order to deliver. Must currently be `Ready`.
    pub order_id: Uuid,

    /// Courier name; must not be blank.
    #[validate(custom = "validate_not_blank")]
    pub courier_name: String,

    /// Courier contact phone; must not be blank.
    #[validate(custom = "validate_not_blank")]
    pub courier_phone: String,

    /// Free-text estimated delivery time. Defaults to "30 minutos".
    pub estimated_time: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// The delivery assignment tracker.
///
/// Layers courier sub-states on top of orders in `Ready` status. Like the
/// order ledger it is the sole authority over its state machine
/// (`assigned -> picking_up -> on_the_way -> delivered`), and reaching
/// `Delivered` drives the referenced order to its own terminal status
/// through the ledger.
#[derive(Debug, Default)]
pub struct DeliveryService {
    assignments: Vec<DeliveryAssignment>,
    events: Option<EventSender>,
}

impl DeliveryService {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tracker that publishes delivery events.
    pub fn with_events(events: EventSender) -> Self {
        Self {
            assignments: Vec::new(),
            events: Some(events),
        }
    }

    /// Assigns a courier to a ready order and notifies the courier channel.
    ///
    /// Fails without creating a record when the courier contact is blank,
    /// the order is unknown, the order is not `Ready`, or the order already
    /// has a non-delivered assignment.
    #[instrument(skip(self, orders, channel), fields(order_id = %input.order_id))]
    pub fn assign(
        &mut self,
        orders: &OrderService,
        input: AssignCourierInput,
        channel: &dyn CourierChannel,
    ) -> Result<DeliveryAssignment, ServiceError> {
        input.validate()?;

        let order = orders.order(input.order_id).ok_or_else(|| {
            warn!("Order not found for courier assignment");
            ServiceError::NotFound(format!("Order {} not found", input.order_id))
        })?;

        if order.status != OrderStatus::Ready {
            return Err(ServiceError::InvalidOperation(format!(
                "Order {} is not ready for assignment (status: {})",
                order.id, order.status
            )));
        }

        if self
            .assignments
            .iter()
            .any(|a| a.order_id == order.id && a.status != AssignmentStatus::Delivered)
        {
            return Err(ServiceError::InvalidOperation(format!(
                "Order {} already has an active assignment",
                order.id
            )));
        }

        let assignment = DeliveryAssignment::new(
            order.id,
            input.courier_name,
            input.courier_phone,
            input
                .estimated_time
                .filter(|eta| !eta.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ESTIMATED_TIME.to_string()),
        );
        self.assignments.push(assignment.clone());

        channel.courier_assigned(&assignment, order);

        if let Some(events) = &self.events {
            events.send_or_log(Event::CourierAssigned {
                assignment_id: assignment.id,
                order_id: order.id,
            });
        }

        info!(assignment_id = %assignment.id, courier = %assignment.courier_name, "Courier assigned");
        Ok(assignment)
    }

    /// Moves an assignment to a new status, enforcing the adjacency table.
    ///
    /// Reaching `Delivered` also moves the linked order to `Delivered`
    /// through the ledger; repeating the call is idempotent on both records.
    #[instrument(skip(self, orders), fields(assignment_id = %assignment_id, requested = %status))]
    pub fn update_status(
        &mut self,
        orders: &mut OrderService,
        assignment_id: Uuid,
        status: AssignmentStatus,
    ) -> Result<DeliveryAssignment, ServiceError> {
        let assignment = self
            .assignments
            .iter_mut()
            .find(|a| a.id == assignment_id)
            .ok_or_else(|| {
                warn!("Assignment not found for status update");
                ServiceError::NotFound(format!("Assignment {} not found", assignment_id))
            })?;

        if !assignment.status.can_transition_to(status) {
            warn!(current = %assignment.status, "Rejected assignment status transition");
            return Err(ServiceError::InvalidStatusTransition {
                from: assignment.status.to_string(),
                to: status.to_string(),
            });
        }

        if assignment.status != status {
            let old_status = assignment.status;
            assignment.status = status;

            if let Some(events) = &self.events {
                events.send_or_log(Event::AssignmentStatusChanged {
                    assignment_id,
                    old_status,
                    new_status: status,
                });
            }

            info!(old_status = %old_status, "Assignment status updated");
        }

        let updated = assignment.clone();

        // The one place order status is driven indirectly rather than by
        // staff action.
        if status == AssignmentStatus::Delivered {
            orders.update_status(updated.order_id, OrderStatus::Delivered)?;
        }

        Ok(updated)
    }

    /// Exact-match lookup. Absence is not an error.
    pub fn assignment(&self, assignment_id: Uuid) -> Option<&DeliveryAssignment> {
        self.assignments.iter().find(|a| a.id == assignment_id)
    }

    /// All assignments, in assignment order.
    pub fn assignments(&self) -> &[DeliveryAssignment] {
        &self.assignments
    }

    /// Assignments not yet delivered: the active set.
    pub fn active_assignments(&self) -> Vec<&DeliveryAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.status != AssignmentStatus::Delivered)
            .collect()
    }

    /// The ready-for-assignment queue: orders in `Ready` status with no
    /// non-delivered assignment yet.
    pub fn unassigned_ready_orders<'a>(&self, orders: &'a OrderService) -> Vec<&'a Order> {
        orders
            .orders_with_status(OrderStatus::Ready)
            .into_iter()
            .filter(|order| {
                !self
                    .assignments
                    .iter()
                    .any(|a| a.order_id == order.id && a.status != AssignmentStatus::Delivered)
            })
            .collect()
    }
}
