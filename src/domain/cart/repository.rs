//! Cart repository interface

use async_trait::async_trait;

use super::model::Cart;
use crate::domain::DomainResult;

/// An edit applied to a session's cart while the repository holds it exclusively
pub type CartMutation<'a> = Box<dyn FnOnce(&mut Cart) + Send + 'a>;

/// Carts are keyed by the browsing session that owns them.
///
/// Writes go through `update` and `take` so concurrent requests for one
/// session never overwrite each other.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Returns an empty cart when the session has none yet
    async fn load(&self, session_id: &str) -> DomainResult<Cart>;
    /// Apply `mutation` atomically and return the cart as it was left.
    /// A cart left empty is not kept.
    async fn update(&self, session_id: &str, mutation: CartMutation<'_>) -> DomainResult<Cart>;
    /// Remove and return the session's cart (empty when it had none)
    async fn take(&self, session_id: &str) -> DomainResult<Cart>;
}
