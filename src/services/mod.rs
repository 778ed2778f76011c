//! Service layer: each component of the ordering core as an explicit owned
//! store, constructed once per session and passed by reference to the
//! components that need it.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod delivery;
pub mod orders;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use checkout::CheckoutService;
pub use customers::{CustomerDirectory, RegisterCustomerInput};
pub use delivery::{AssignCourierInput, DeliveryService};
pub use orders::{CreateOrderInput, OrderService};
