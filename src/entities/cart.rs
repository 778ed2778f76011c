use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::Product;

/// One distinct product + observation combination in a cart, with its quantity.
///
/// The embedded product is a snapshot, not a live catalog reference: admin
/// edits made after the line was added do not change the line. Two lines are
/// the same slot iff product id and observation text are both equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Synthetic line identifier.
    pub id: Uuid,

    /// Product snapshot taken when the line was created.
    pub product: Product,

    /// Quantity, always >= 1 in a stored line.
    pub quantity: i32,

    /// Free-text customer observation, e.g. "sem cebola".
    pub observation: Option<String>,
}

impl CartLine {
    /// Creates a new line with a generated id.
    pub fn new(product: Product, quantity: i32, observation: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            product,
            quantity,
            observation,
        }
    }

    /// Whether this line is the slot for the given product/observation pair.
    pub fn is_slot_for(&self, product_id: Uuid, observation: Option<&str>) -> bool {
        self.product.id == product_id && self.observation.as_deref() == observation
    }

    /// Line total: quantity x sale price. Ignores `original_price`.
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Sum of line totals across a set of lines.
pub fn lines_subtotal(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}
