use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer account record.
///
/// The phone number is the natural external key: order history lookups and
/// the account directory are both keyed by it. The credential is an opaque
/// secret that is compared on authentication and never logged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier for the customer.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Contact phone; externally stable identifier.
    pub phone: String,

    /// Default delivery address, used for pickup orders' contact snapshot.
    pub address: String,

    /// Opaque login secret.
    #[serde(skip_serializing)]
    pub credential: String,
}

impl Customer {
    /// Creates a new customer with a generated id.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            credential: credential.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_not_serialized() {
        let customer = Customer::new("Maria", "21988887777", "Rua A, 1", "segredo");
        let json = serde_json::to_string(&customer).unwrap();
        assert!(!json.contains("segredo"));
        assert!(json.contains("21988887777"));
    }
}
