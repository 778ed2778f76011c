use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::{Validate, ValidationError};

use crate::{entities::Customer, errors::ServiceError};

/// Input for registering a customer account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterCustomerInput {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[validate(custom = "validate_not_blank")]
    pub phone: String,
    pub address: String,
    #[validate(length(min = 1, message = "Credential is required"))]
    pub credential: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// The account directory.
///
/// Customer records keyed by phone, the externally stable identifier the
/// order ledger's history lookups also use. The persisted key-value store
/// behind the browser is out of scope; this is the in-memory contract it
/// must satisfy. Credentials are compared, never logged.
#[derive(Debug, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new account. The phone must not already be registered.
    #[instrument(skip(self, input), fields(phone = %input.phone))]
    pub fn register(&mut self, input: RegisterCustomerInput) -> Result<Customer, ServiceError> {
        input.validate()?;

        if self.customers.iter().any(|c| c.phone == input.phone) {
            return Err(ServiceError::InvalidOperation(format!(
                "Phone {} is already registered",
                input.phone
            )));
        }

        let customer = Customer::new(input.name, input.phone, input.address, input.credential);
        self.customers.push(customer.clone());

        info!(customer_id = %customer.id, "Customer registered");
        Ok(customer)
    }

    /// Returns the account when phone and credential both match exactly.
    pub fn authenticate(&self, phone: &str, credential: &str) -> Option<Customer> {
        self.customers
            .iter()
            .find(|c| c.phone == phone && c.credential == credential)
            .cloned()
    }

    /// Exact-match lookup by phone.
    pub fn find_by_phone(&self, phone: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.phone == phone)
    }

    /// Updates name and address on an existing account.
    pub fn update_profile(
        &mut self,
        phone: &str,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Customer, ServiceError> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.phone == phone)
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", phone)))?;

        customer.name = name.into();
        customer.address = address.into();
        Ok(customer.clone())
    }
}
