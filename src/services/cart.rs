use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    entities::{lines_subtotal, CartLine, Product},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Shopping cart for the current session.
///
/// Holds the ordered sequence of [`CartLine`]s and the derived totals. Adding
/// a product merges into the existing line when product id and observation
/// both match; a different observation always creates a new line, even for
/// the same product. Setting a line's quantity to zero or below removes it,
/// so a stored line always has quantity >= 1.
#[derive(Debug, Default)]
pub struct CartService {
    lines: Vec<CartLine>,
    events: Option<EventSender>,
}

impl CartService {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cart that publishes cart events.
    pub fn with_events(events: EventSender) -> Self {
        Self {
            lines: Vec::new(),
            events: Some(events),
        }
    }

    /// Adds a product to the cart, merging into an existing slot when product
    /// id and observation both match. Returns the id of the affected line.
    ///
    /// The quantity must be at least 1.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i32,
        observation: Option<String>,
    ) -> Result<Uuid, ServiceError> {
        if quantity < 1 {
            return Err(ServiceError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let line_id = match self
            .lines
            .iter_mut()
            .find(|line| line.is_slot_for(product.id, observation.as_deref()))
        {
            Some(line) => {
                line.quantity += quantity;
                line.id
            }
            None => {
                let line = CartLine::new(product.clone(), quantity, observation);
                let id = line.id;
                self.lines.push(line);
                id
            }
        };

        if let Some(events) = &self.events {
            events.send_or_log(Event::CartItemAdded {
                line_id,
                product_id: product.id,
            });
        }

        info!(line_id = %line_id, quantity, "Added item to cart");
        Ok(line_id)
    }

    /// Drops the line with the given id. No-op if absent.
    pub fn remove_item(&mut self, line_id: Uuid) {
        self.lines.retain(|line| line.id != line_id);
    }

    /// Replaces a line's quantity in place. A quantity of zero or less
    /// behaves exactly as [`CartService::remove_item`]. No-op for an unknown
    /// line id.
    pub fn update_item_quantity(&mut self, line_id: Uuid, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(line_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.id == line_id) {
            line.quantity = quantity;
        }
    }

    /// Empties the cart. Used after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
        if let Some(events) = &self.events {
            events.send_or_log(Event::CartCleared);
        }
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> i32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of line totals. Ignores `original_price`.
    pub fn subtotal(&self) -> Decimal {
        lines_subtotal(&self.lines)
    }

    /// Deep copy of the current lines, for embedding into an order.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
    }
}
