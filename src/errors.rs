use serde::Serialize;

/// Error taxonomy for the ordering core.
///
/// Validation failures and rejected state transitions are recoverable: the
/// caller re-prompts and retries. Lookup misses on read paths are represented
/// as `Option`, not as errors; write paths that need a target record return
/// [`ServiceError::NotFound`]. No variant is fatal to the process.
#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("A delivery address is required for delivery orders")]
    MissingAddress,
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ServiceError::NotFound("Order abc".to_string());
        assert_eq!(err.to_string(), "Not found: Order abc");

        let err = ServiceError::InvalidStatusTransition {
            from: "pending".to_string(),
            to: "delivered".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid status transition: pending -> delivered"
        );
    }

    #[test]
    fn test_missing_address_is_standalone() {
        let err = ServiceError::MissingAddress;
        assert!(err.to_string().contains("delivery address"));
    }
}
