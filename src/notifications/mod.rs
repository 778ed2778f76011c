//! Boundary traits for the outbound messaging collaborators.
//!
//! The core supplies the data for a notification; formatting the message and
//! transporting it (the messaging-app hand-off) belong to the caller. Two
//! channels exist: one aimed at the restaurant when an order is placed, one
//! aimed at the courier when a delivery is assigned.

use std::cell::RefCell;

use uuid::Uuid;

use crate::entities::{DeliveryAssignment, DeliveryChoice, Order, PaymentDetails};

/// Outbound channel notified when a checkout completes.
pub trait OrderChannel {
    /// Hands a freshly created order, the payment details collected at
    /// checkout, and the delivery choice to the messaging surface.
    fn order_placed(&self, order: &Order, payment: &PaymentDetails, delivery: &DeliveryChoice);
}

/// Outbound channel notified when a courier is assigned to an order.
pub trait CourierChannel {
    /// Hands the new assignment and the order it references to the messaging
    /// surface.
    fn courier_assigned(&self, assignment: &DeliveryAssignment, order: &Order);
}

/// Channel that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullChannel;

impl OrderChannel for NullChannel {
    fn order_placed(&self, _order: &Order, _payment: &PaymentDetails, _delivery: &DeliveryChoice) {}
}

impl CourierChannel for NullChannel {
    fn courier_assigned(&self, _assignment: &DeliveryAssignment, _order: &Order) {}
}

/// Channel that records the ids it was handed. Test double.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    placed_orders: RefCell<Vec<Uuid>>,
    assigned_couriers: RefCell<Vec<Uuid>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of orders handed to `order_placed`, in call order.
    pub fn placed_orders(&self) -> Vec<Uuid> {
        self.placed_orders.borrow().clone()
    }

    /// Ids of assignments handed to `courier_assigned`, in call order.
    pub fn assigned_couriers(&self) -> Vec<Uuid> {
        self.assigned_couriers.borrow().clone()
    }
}

impl OrderChannel for RecordingChannel {
    fn order_placed(&self, order: &Order, _payment: &PaymentDetails, _delivery: &DeliveryChoice) {
        self.placed_orders.borrow_mut().push(order.id);
    }
}

impl CourierChannel for RecordingChannel {
    fn courier_assigned(&self, assignment: &DeliveryAssignment, _order: &Order) {
        self.assigned_couriers.borrow_mut().push(assignment.id);
    }
}
