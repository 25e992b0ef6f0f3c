//! Domain errors

use thiserror::Error;

/// Domain-level error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Entity lookup failed
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Input rejected by a business rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// Order submitted with nothing in the cart
    #[error("Cart is empty")]
    EmptyCart,

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// The product source could not be read
    #[error("Catalog source error: {0}")]
    CatalogSource(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = DomainError::not_found("Product", "sku-1");
        assert_eq!(err.to_string(), "Product not found: sku-1");
    }
}
