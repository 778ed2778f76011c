use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{lines_subtotal, CartLine, CustomerInfo, Order, OrderStatus, PaymentMethod},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Input for creating an order.
///
/// Carries the delivery fee rather than a grand total: the ledger computes
/// the total itself from the line snapshot plus the fee, so a caller can
/// never store a figure that disagrees with the lines.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderInput {
    /// Deep snapshot of the cart lines.
    #[validate(length(min = 1, message = "Order must contain at least one line"))]
    pub lines: Vec<CartLine>,

    /// Customer contact snapshot.
    #[validate]
    pub customer: CustomerInfo,

    /// Payment method tag.
    pub payment_method: PaymentMethod,

    /// Delivery fee computed by the checkout orchestrator (zero for pickup).
    #[validate(custom = "crate::entities::product::validate_non_negative_amount")]
    pub delivery_fee: Decimal,
}

/// The order ledger.
///
/// Append-only store of every order created in this session, and the sole
/// authority over order status transitions: only the immediate successor in
/// `pending -> preparing -> ready -> delivered` is accepted (re-requesting
/// the current status is an idempotent no-op).
#[derive(Debug, Default)]
pub struct OrderService {
    orders: Vec<Order>,
    events: Option<EventSender>,
}

impl OrderService {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ledger that publishes order events.
    pub fn with_events(events: EventSender) -> Self {
        Self {
            orders: Vec::new(),
            events: Some(events),
        }
    }

    /// Creates a new order in `Pending` status and returns a copy of it.
    ///
    /// The total is computed here as line subtotal + delivery fee. There is
    /// no duplicate detection; identical inputs create distinct orders.
    #[instrument(skip(self, input), fields(customer_phone = %input.customer.phone))]
    pub fn create(&mut self, input: CreateOrderInput) -> Result<Order, ServiceError> {
        input.validate()?;

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            number: format!("ORD-{}", now.timestamp_millis()),
            total: lines_subtotal(&input.lines) + input.delivery_fee,
            lines: input.lines,
            customer: input.customer,
            payment_method: input.payment_method,
            delivery_fee: input.delivery_fee,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.orders.push(order.clone());

        if let Some(events) = &self.events {
            events.send_or_log(Event::OrderCreated(order.id));
        }

        info!(order_id = %order.id, number = %order.number, total = %order.total, "Order created");
        Ok(order)
    }

    /// Moves an order to a new status, enforcing the adjacency table.
    ///
    /// Returns `NotFound` for an unknown id and `InvalidStatusTransition`
    /// for a skipped or backward move; in both cases the ledger is left
    /// unchanged. A legal transition bumps `updated_at`.
    #[instrument(skip(self), fields(order_id = %order_id, requested = %status))]
    pub fn update_status(
        &mut self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, ServiceError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| {
                warn!("Order not found for status update");
                ServiceError::NotFound(format!("Order {} not found", order_id))
            })?;

        if !order.status.can_transition_to(status) {
            warn!(current = %order.status, "Rejected status transition");
            return Err(ServiceError::InvalidStatusTransition {
                from: order.status.to_string(),
                to: status.to_string(),
            });
        }

        if order.status == status {
            // Idempotent re-request; nothing to record.
            return Ok(order.clone());
        }

        let old_status = order.status;
        order.record_status(status);
        let updated = order.clone();

        if let Some(events) = &self.events {
            events.send_or_log(Event::OrderStatusChanged {
                order_id,
                old_status,
                new_status: status,
            });
        }

        info!(old_status = %old_status, "Order status updated");
        Ok(updated)
    }

    /// Exact-match lookup. Absence is not an error.
    pub fn order(&self, order_id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// All orders, in creation order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders whose customer snapshot phone equals the given phone, in
    /// creation order.
    pub fn orders_for_phone(&self, phone: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.customer.phone == phone)
            .collect()
    }

    /// Orders currently in the given status, in creation order.
    pub fn orders_with_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.status == status).collect()
    }
}
