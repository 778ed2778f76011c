//! Delivery assignment flow over the full session: ready queue, courier
//! hand-off, and the indirect drive of the order's terminal status.

mod common;

use common::{customer, delivery_to, pix, product, storefront};
use rust_decimal_macros::dec;
use storefront_core::{
    entities::{AssignmentStatus, OrderStatus},
    errors::ServiceError,
    notifications::{NullChannel, RecordingChannel},
    services::AssignCourierInput,
    Storefront,
};
use uuid::Uuid;

fn ready_order(app: &mut Storefront) -> Uuid {
    app.cart
        .add_item(&product("Combo", dec!(32.90)), 1, None)
        .unwrap();
    let order_id = app
        .place_order(&customer(), pix(), delivery_to("Rua C, 3"), &NullChannel)
        .unwrap();
    app.orders.update_status(order_id, OrderStatus::Preparing).unwrap();
    app.orders.update_status(order_id, OrderStatus::Ready).unwrap();
    order_id
}

fn courier(order_id: Uuid) -> AssignCourierInput {
    AssignCourierInput {
        order_id,
        courier_name: "Carlos".to_string(),
        courier_phone: "21999990000".to_string(),
        estimated_time: Some("20 minutos".to_string()),
    }
}

#[test]
fn test_assign_then_deliver_drives_order() {
    let mut app = storefront();
    let order_id = ready_order(&mut app);
    let channel = RecordingChannel::new();

    let assignment = app.assign_courier(courier(order_id), &channel).unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Assigned);
    assert_eq!(channel.assigned_couriers(), vec![assignment.id]);

    app.update_delivery_status(assignment.id, AssignmentStatus::PickingUp).unwrap();
    app.update_delivery_status(assignment.id, AssignmentStatus::OnTheWay).unwrap();
    app.update_delivery_status(assignment.id, AssignmentStatus::Delivered).unwrap();

    assert_eq!(
        app.delivery.assignment(assignment.id).unwrap().status,
        AssignmentStatus::Delivered
    );
    assert_eq!(app.orders.order(order_id).unwrap().status, OrderStatus::Delivered);
}

#[test]
fn test_delivered_update_is_idempotent_on_the_order() {
    let mut app = storefront();
    let order_id = ready_order(&mut app);
    let assignment = app.assign_courier(courier(order_id), &NullChannel).unwrap();

    for status in [
        AssignmentStatus::PickingUp,
        AssignmentStatus::OnTheWay,
        AssignmentStatus::Delivered,
        AssignmentStatus::Delivered,
    ] {
        app.update_delivery_status(assignment.id, status).unwrap();
    }

    assert_eq!(app.orders.order(order_id).unwrap().status, OrderStatus::Delivered);
}

#[test]
fn test_ready_queue_tracks_active_assignments() {
    let mut app = storefront();
    let first = ready_order(&mut app);
    let second = ready_order(&mut app);

    let queue: Vec<Uuid> = app
        .delivery
        .unassigned_ready_orders(&app.orders)
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(queue, vec![first, second]);

    let assignment = app.assign_courier(courier(first), &NullChannel).unwrap();
    let queue: Vec<Uuid> = app
        .delivery
        .unassigned_ready_orders(&app.orders)
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(queue, vec![second]);
    assert_eq!(app.delivery.active_assignments().len(), 1);

    // A second courier for the same order is rejected while one is active.
    assert!(matches!(
        app.assign_courier(courier(first), &NullChannel),
        Err(ServiceError::InvalidOperation(_))
    ));
    let _ = assignment;
}

#[test]
fn test_assignment_requires_ready_order() {
    let mut app = storefront();
    app.cart
        .add_item(&product("Lanche", dec!(15.00)), 1, None)
        .unwrap();
    let pending = app
        .place_order(&customer(), pix(), delivery_to("Rua D, 4"), &NullChannel)
        .unwrap();

    assert!(matches!(
        app.assign_courier(courier(pending), &NullChannel),
        Err(ServiceError::InvalidOperation(_))
    ));
    assert!(app.delivery.assignments().is_empty());
}

#[test]
fn test_blank_courier_contact_rejected() {
    let mut app = storefront();
    let order_id = ready_order(&mut app);

    let mut input = courier(order_id);
    input.courier_phone = "  ".to_string();
    assert!(matches!(
        app.assign_courier(input, &NullChannel),
        Err(ServiceError::Validation(_))
    ));
    assert!(app.delivery.assignments().is_empty());
}
