use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_RESTAURANT_NAME: &str = "Toque de Amor Lanches e Hambúrguer";
const DEFAULT_CONTACT_PHONE: &str = "5521976003669";
const DEFAULT_PIX_KEY: &str = "luizfernando@tokdeamor.com.br";
const DEFAULT_DELIVERY_FEE: f64 = 4.99;
const DEFAULT_SMALL_ORDER_SURCHARGE: f64 = 2.00;
const DEFAULT_MINIMUM_ORDER: f64 = 25.00;
const CONFIG_FILE: &str = "config/store";
const ENV_PREFIX: &str = "STORE";

/// Restaurant-level configuration with validation.
///
/// Monetary settings are stored as `f64` for the benefit of the file/env
/// sources and converted to [`Decimal`] at the accessor boundary; the core
/// never does price arithmetic on floats.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Display name of the restaurant
    #[serde(default = "default_restaurant_name")]
    #[validate(length(min = 1, message = "Restaurant name is required"))]
    pub restaurant_name: String,

    /// Outbound messaging number the notification collaborator targets
    #[serde(default = "default_contact_phone")]
    #[validate(length(min = 1, message = "Contact phone is required"))]
    pub contact_phone: String,

    /// PIX key surfaced to the payment step
    #[serde(default = "default_pix_key")]
    pub pix_key: String,

    /// Base delivery fee charged on delivery orders
    #[serde(default = "default_delivery_fee")]
    #[validate(range(min = 0.0))]
    pub delivery_fee: f64,

    /// Surcharge added to the base fee when the subtotal is below the minimum order
    #[serde(default = "default_small_order_surcharge")]
    #[validate(range(min = 0.0))]
    pub small_order_surcharge: f64,

    /// Subtotal threshold under which the small-order surcharge applies
    #[serde(default = "default_minimum_order")]
    #[validate(range(min = 0.0))]
    pub minimum_order: f64,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_restaurant_name() -> String {
    DEFAULT_RESTAURANT_NAME.to_string()
}

fn default_contact_phone() -> String {
    DEFAULT_CONTACT_PHONE.to_string()
}

fn default_pix_key() -> String {
    DEFAULT_PIX_KEY.to_string()
}

fn default_delivery_fee() -> f64 {
    DEFAULT_DELIVERY_FEE
}

fn default_small_order_surcharge() -> f64 {
    DEFAULT_SMALL_ORDER_SURCHARGE
}

fn default_minimum_order() -> f64 {
    DEFAULT_MINIMUM_ORDER
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            restaurant_name: default_restaurant_name(),
            contact_phone: default_contact_phone(),
            pix_key: default_pix_key(),
            delivery_fee: default_delivery_fee(),
            small_order_surcharge: default_small_order_surcharge(),
            minimum_order: default_minimum_order(),
            log_level: default_log_level(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from `config/store.*` (optional) layered with
    /// `STORE_`-prefixed environment variables, then validates it.
    pub fn load() -> Result<Self, ConfigError> {
        let settings: StoreConfig = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(settings)
    }

    /// Base delivery fee as an exact decimal amount, rounded to cents.
    pub fn delivery_fee(&self) -> Decimal {
        Decimal::from_f64_retain(self.delivery_fee)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2)
    }

    /// Small-order surcharge as an exact decimal amount, rounded to cents.
    pub fn small_order_surcharge(&self) -> Decimal {
        Decimal::from_f64_retain(self.small_order_surcharge)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2)
    }

    /// Minimum order threshold as an exact decimal amount, rounded to cents.
    pub fn minimum_order(&self) -> Decimal {
        Decimal::from_f64_retain(self.minimum_order)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2)
    }
}
