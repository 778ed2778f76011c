//! Domain events emitted by the services.
//!
//! The core runs single-threaded, so events travel over a plain
//! [`std::sync::mpsc`] channel. Senders are optional on every service and a
//! failed send is logged, never propagated: event delivery must not affect
//! the operation that produced it.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::entities::{AssignmentStatus, OrderStatus};

/// The various events that can occur in the ordering core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Cart events
    CartItemAdded {
        line_id: Uuid,
        product_id: Uuid,
    },
    CartCleared,

    // Order events
    OrderCreated(Uuid),
    OrderStatusChanged {
        order_id: Uuid,
        old_status: OrderStatus,
        new_status: OrderStatus,
    },

    // Delivery events
    CourierAssigned {
        assignment_id: Uuid,
        order_id: Uuid,
    },
    AssignmentStatusChanged {
        assignment_id: Uuid,
        old_status: AssignmentStatus,
        new_status: AssignmentStatus,
    },
}

/// Cloneable handle for publishing [`Event`]s.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender over an existing channel half.
    pub fn new(sender: Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event, failing if the receiving half has been dropped.
    pub fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event and logs a warning on failure instead of returning it.
    pub fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event) {
            warn!(error = %e, "Event dropped");
        }
    }
}

/// Creates a connected event channel.
pub fn channel() -> (EventSender, Receiver<Event>) {
    let (sender, receiver) = mpsc::channel();
    (EventSender::new(sender), receiver)
}
