//! Ordering core for a single-restaurant online storefront.
//!
//! This crate holds the domain model behind the storefront: the product
//! catalog, the session shopping cart, the append-only order ledger, the
//! delivery assignment tracker, and the checkout orchestration that ties
//! them together. Presentation, authentication storage, and the outbound
//! messaging hand-off are collaborators at the boundary; the core supplies
//! data and enforces the state machines.
//!
//! All state is in memory and scoped to one session with exactly one writer
//! at a time. The contracts here are not safe to share across threads
//! without an added serialization layer.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod entities;
pub mod errors;
pub mod events;
pub mod notifications;
pub mod services;

use uuid::Uuid;

use crate::{
    config::StoreConfig,
    entities::{Category, Customer, DeliveryAssignment, DeliveryChoice, PaymentDetails, Product},
    errors::ServiceError,
    events::EventSender,
    notifications::{CourierChannel, OrderChannel},
    services::{
        AssignCourierInput, CartService, CatalogService, CheckoutService, CustomerDirectory,
        DeliveryService, OrderService,
    },
};

/// One session's worth of ordering state.
///
/// Owns every store and service, making lifetime and ownership explicit in
/// the constructor graph: build one `Storefront` per session and route all
/// operations through it (or through its parts directly).
#[derive(Debug)]
pub struct Storefront {
    pub catalog: CatalogService,
    pub cart: CartService,
    pub customers: CustomerDirectory,
    pub orders: OrderService,
    pub delivery: DeliveryService,
    pub checkout: CheckoutService,
}

impl Storefront {
    /// Creates a storefront session without event publishing.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            catalog: CatalogService::new(),
            cart: CartService::new(),
            customers: CustomerDirectory::new(),
            orders: OrderService::new(),
            delivery: DeliveryService::new(),
            checkout: CheckoutService::new(config),
        }
    }

    /// Creates a storefront session whose services publish domain events to
    /// the given sender.
    pub fn with_events(config: StoreConfig, events: EventSender) -> Self {
        Self {
            catalog: CatalogService::new(),
            cart: CartService::with_events(events.clone()),
            customers: CustomerDirectory::new(),
            orders: OrderService::with_events(events.clone()),
            delivery: DeliveryService::with_events(events),
            checkout: CheckoutService::new(config),
        }
    }

    /// Seeds the catalog with an existing menu.
    pub fn with_menu(mut self, categories: Vec<Category>, products: Vec<Product>) -> Self {
        self.catalog = CatalogService::with_menu(categories, products);
        self
    }

    /// Completes checkout for the current cart. See
    /// [`CheckoutService::finish_order`].
    pub fn place_order(
        &mut self,
        customer: &Customer,
        payment: PaymentDetails,
        delivery: DeliveryChoice,
        channel: &dyn OrderChannel,
    ) -> Result<Uuid, ServiceError> {
        self.checkout.finish_order(
            &mut self.cart,
            &mut self.orders,
            customer,
            payment,
            delivery,
            channel,
        )
    }

    /// Assigns a courier to a ready order. See [`DeliveryService::assign`].
    pub fn assign_courier(
        &mut self,
        input: AssignCourierInput,
        channel: &dyn CourierChannel,
    ) -> Result<DeliveryAssignment, ServiceError> {
        self.delivery.assign(&self.orders, input, channel)
    }

    /// Moves a delivery assignment to a new status, driving the linked order
    /// when it reaches its terminal state. See
    /// [`DeliveryService::update_status`].
    pub fn update_delivery_status(
        &mut self,
        assignment_id: Uuid,
        status: entities::AssignmentStatus,
    ) -> Result<DeliveryAssignment, ServiceError> {
        self.delivery
            .update_status(&mut self.orders, assignment_id, status)
    }
}
