use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    config::StoreConfig,
    entities::{Customer, CustomerInfo, DeliveryChoice, PaymentDetails},
    errors::ServiceError,
    notifications::OrderChannel,
    services::{cart::CartService, orders::CreateOrderInput, orders::OrderService},
};

/// The checkout orchestrator.
///
/// Turns the current cart into an order: validates the delivery choice,
/// computes the delivery fee from restaurant configuration, hands a deep
/// cart snapshot to the ledger, clears the cart, and notifies the order
/// channel. Nothing is cleared or notified unless the ledger accepted the
/// order.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    config: StoreConfig,
}

impl CheckoutService {
    /// Creates a checkout orchestrator over the given configuration.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Completes checkout for the authenticated customer and returns the new
    /// order's id.
    ///
    /// Fails with `InvalidOperation` on an empty cart and `MissingAddress`
    /// when a delivery order carries a blank address; in both cases no order
    /// is created and the cart is unchanged.
    #[instrument(skip_all, fields(customer_phone = %customer.phone))]
    pub fn finish_order(
        &self,
        cart: &mut CartService,
        orders: &mut OrderService,
        customer: &Customer,
        payment: PaymentDetails,
        delivery: DeliveryChoice,
        channel: &dyn OrderChannel,
    ) -> Result<Uuid, ServiceError> {
        if cart.is_empty() {
            return Err(ServiceError::InvalidOperation("Cart is empty".to_string()));
        }

        let address = match &delivery {
            DeliveryChoice::Delivery { address } => {
                if address.trim().is_empty() {
                    return Err(ServiceError::MissingAddress);
                }
                address.clone()
            }
            DeliveryChoice::Pickup => customer.address.clone(),
        };

        let delivery_fee = self.delivery_fee(cart.subtotal(), &delivery);

        let order = orders.create(CreateOrderInput {
            lines: cart.snapshot(),
            customer: CustomerInfo {
                name: customer.name.clone(),
                phone: customer.phone.clone(),
                address,
            },
            payment_method: payment.method(),
            delivery_fee,
        })?;

        cart.clear();
        channel.order_placed(&order, &payment, &delivery);

        info!(order_id = %order.id, total = %order.total, "Checkout completed");
        Ok(order.id)
    }

    /// Delivery fee for a given subtotal and delivery choice: zero for
    /// pickup; otherwise the base fee, plus the small-order surcharge when
    /// the subtotal is below the minimum order.
    pub fn delivery_fee(&self, subtotal: Decimal, delivery: &DeliveryChoice) -> Decimal {
        match delivery {
            DeliveryChoice::Pickup => Decimal::ZERO,
            DeliveryChoice::Delivery { .. } => {
                let base = self.config.delivery_fee();
                if subtotal < self.config.minimum_order() {
                    base + self.config.small_order_surcharge()
                } else {
                    base
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn checkout() -> CheckoutService {
        // Defaults: base fee 4.99, surcharge 2.00, minimum 25.00.
        CheckoutService::new(StoreConfig::default())
    }

    fn delivery() -> DeliveryChoice {
        DeliveryChoice::Delivery {
            address: "Rua das Flores, 10".to_string(),
        }
    }

    #[test]
    fn test_pickup_fee_is_zero_regardless_of_subtotal() {
        let service = checkout();
        assert_eq!(service.delivery_fee(dec!(5.00), &DeliveryChoice::Pickup), Decimal::ZERO);
        assert_eq!(service.delivery_fee(dec!(500.00), &DeliveryChoice::Pickup), Decimal::ZERO);
    }

    #[test]
    fn test_delivery_fee_base_at_or_above_minimum() {
        let service = checkout();
        assert_eq!(service.delivery_fee(dec!(25.00), &delivery()), dec!(4.99));
        assert_eq!(service.delivery_fee(dec!(80.00), &delivery()), dec!(4.99));
    }

    #[test]
    fn test_delivery_fee_surcharged_below_minimum() {
        let service = checkout();
        assert_eq!(service.delivery_fee(dec!(24.99), &delivery()), dec!(6.99));
        assert_eq!(service.delivery_fee(dec!(1.00), &delivery()), dec!(6.99));
    }
}
