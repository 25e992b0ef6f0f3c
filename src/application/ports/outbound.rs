//! Outbound ports
//!
//! Every fallible collaborator call returns a [`DomainResult`] so callers
//! branch on success or a typed error explicitly.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{CartLine, DomainResult, Product};

/// Supplies the full product set.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// An empty catalog is a valid answer, not an error.
    async fn load_catalog(&self) -> DomainResult<Vec<Product>>;
}

/// Locale-aware currency formatting. Pure and infallible.
pub trait PriceFormatter: Send + Sync {
    fn format_price(&self, amount: Decimal) -> String;
}

/// Cart operations the catalog triggers.
#[async_trait]
pub trait CartPort: Send + Sync {
    /// Record an addition; returns the resulting cart line.
    async fn add_to_cart(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: u32,
        size: &str,
    ) -> DomainResult<CartLine>;

    /// Total quantity across all cart lines, for the badge.
    async fn cart_item_count(&self, session_id: &str) -> DomainResult<u32>;
}
