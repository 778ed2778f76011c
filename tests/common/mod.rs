//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use rust_decimal::Decimal;
use storefront_core::{
    config::StoreConfig,
    entities::{Customer, DeliveryChoice, PaymentDetails, Product},
    Storefront,
};
use uuid::Uuid;

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A session over the default restaurant configuration
/// (base fee 4.99, surcharge 2.00, minimum order 25.00).
pub fn storefront() -> Storefront {
    init_tracing();
    Storefront::new(StoreConfig::default())
}

pub fn product(name: &str, price: Decimal) -> Product {
    Product::new(name, "", price, Uuid::new_v4(), 1)
}

pub fn customer() -> Customer {
    Customer::new("Maria Silva", "21988887777", "Rua A, 1 - Centro", "segredo")
}

pub fn pix() -> PaymentDetails {
    PaymentDetails::Pix {
        key: "luizfernando@tokdeamor.com.br".to_string(),
    }
}

pub fn delivery_to(address: &str) -> DeliveryChoice {
    DeliveryChoice::Delivery {
        address: address.to_string(),
    }
}
