//! Domain models for the ordering core.
//!
//! Entities are plain owned data: products and categories in the catalog,
//! cart lines, order snapshots, delivery assignments, and customer account
//! records. All monetary amounts are [`rust_decimal::Decimal`]; all statuses
//! are closed enums so illegal values are unrepresentable.

pub mod cart;
pub mod customer;
pub mod delivery;
pub mod order;
pub mod product;

pub use cart::{lines_subtotal, CartLine};
pub use customer::Customer;
pub use delivery::{AssignmentStatus, DeliveryAssignment};
pub use order::{
    CustomerInfo, DeliveryChoice, Order, OrderStatus, PaymentDetails, PaymentMethod,
};
pub use product::{Category, Product};
