//! Order ledger lifecycle: forward-only staged transitions, idempotent
//! re-requests, and append-only storage.

mod common;

use common::{customer, pix, product, storefront};
use rust_decimal_macros::dec;
use storefront_core::{
    entities::{DeliveryChoice, OrderStatus},
    errors::ServiceError,
    notifications::NullChannel,
};
use uuid::Uuid;

fn placed_order(app: &mut storefront_core::Storefront) -> Uuid {
    app.cart
        .add_item(&product("X-Bacon", dec!(22.90)), 1, None)
        .unwrap();
    app.place_order(&customer(), pix(), DeliveryChoice::Pickup, &NullChannel)
        .unwrap()
}

#[test]
fn test_staged_progression_to_delivered() {
    let mut app = storefront();
    let order_id = placed_order(&mut app);

    for status in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Delivered] {
        let updated = app.orders.update_status(order_id, status).unwrap();
        assert_eq!(updated.status, status);
    }
    assert_eq!(app.orders.order(order_id).unwrap().status, OrderStatus::Delivered);
}

#[test]
fn test_updated_at_advances_on_transition() {
    let mut app = storefront();
    let order_id = placed_order(&mut app);
    let created_at = app.orders.order(order_id).unwrap().created_at;

    std::thread::sleep(std::time::Duration::from_millis(5));
    let updated = app.orders.update_status(order_id, OrderStatus::Preparing).unwrap();

    assert_eq!(updated.created_at, created_at);
    assert!(updated.updated_at > created_at);
}

#[test]
fn test_unknown_order_update_leaves_ledger_unchanged() {
    let mut app = storefront();
    let order_id = placed_order(&mut app);

    let result = app.orders.update_status(Uuid::new_v4(), OrderStatus::Ready);
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert_eq!(app.orders.orders().len(), 1);
    assert_eq!(app.orders.order(order_id).unwrap().status, OrderStatus::Pending);
}

#[test]
fn test_backward_and_skipping_transitions_rejected() {
    let mut app = storefront();
    let order_id = placed_order(&mut app);

    // Skip two stages.
    assert!(matches!(
        app.orders.update_status(order_id, OrderStatus::Delivered),
        Err(ServiceError::InvalidStatusTransition { .. })
    ));

    app.orders.update_status(order_id, OrderStatus::Preparing).unwrap();
    app.orders.update_status(order_id, OrderStatus::Ready).unwrap();

    // Walk backwards.
    assert!(matches!(
        app.orders.update_status(order_id, OrderStatus::Preparing),
        Err(ServiceError::InvalidStatusTransition { .. })
    ));
    assert_eq!(app.orders.order(order_id).unwrap().status, OrderStatus::Ready);
}

#[test]
fn test_previous_orders_unchanged_by_later_creations() {
    let mut app = storefront();
    let first = placed_order(&mut app);
    app.orders.update_status(first, OrderStatus::Preparing).unwrap();
    let first_snapshot = app.orders.order(first).unwrap().clone();

    let second = placed_order(&mut app);

    assert_ne!(first, second);
    assert_eq!(app.orders.orders().len(), 2);
    assert_eq!(app.orders.order(first).unwrap(), &first_snapshot);
}
