//! In-memory storage implementation

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    Cart, CartMutation, CartRepository, DomainError, DomainResult, Order, OrderRepository,
};

/// Carts keyed by session id
pub struct InMemoryCartRepository {
    carts: DashMap<String, Cart>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Number of sessions holding a non-empty cart
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

impl Default for InMemoryCartRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn load(&self, session_id: &str) -> DomainResult<Cart> {
        Ok(self
            .carts
            .get(session_id)
            .map(|c| c.clone())
            .unwrap_or_default())
    }

    async fn update(&self, session_id: &str, mutation: CartMutation<'_>) -> DomainResult<Cart> {
        let cart = {
            // The shard stays write-locked until the entry guard drops
            let mut entry = self.carts.entry(session_id.to_string()).or_default();
            mutation(entry.value_mut());
            entry.value().clone()
        };
        if cart.is_empty() {
            self.carts.remove_if(session_id, |_, c| c.is_empty());
        }
        Ok(cart)
    }

    async fn take(&self, session_id: &str) -> DomainResult<Cart> {
        Ok(self
            .carts
            .remove(session_id)
            .map(|(_, cart)| cart)
            .unwrap_or_default())
    }
}

/// Orders keyed by id
pub struct InMemoryOrderRepository {
    orders: DashMap<Uuid, Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: Order) -> DomainResult<Order> {
        if self.orders.contains_key(&order.id) {
            return Err(DomainError::Storage(format!(
                "order {} already exists",
                order.id
            )));
        }
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Order>> {
        Ok(self.orders.get(&id).map(|o| o.clone()))
    }

    async fn find_by_session(&self, session_id: &str) -> DomainResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| o.session_id == session_id)
            .map(|o| o.value().clone())
            .collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerDetails, Product};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn missing_cart_loads_empty() {
        let repo = InMemoryCartRepository::new();
        assert!(repo.load("s1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_then_take() {
        let repo = InMemoryCartRepository::new();
        let phone = Product::new("a", "Phone X", Decimal::from(5000));
        let cart = repo
            .update("s1", Box::new(|cart: &mut Cart| {
                cart.add(&phone, 2, "");
            }))
            .await
            .unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(repo.load("s1").await.unwrap(), cart);

        assert_eq!(repo.take("s1").await.unwrap(), cart);
        assert!(repo.load("s1").await.unwrap().is_empty());
        assert!(repo.take("s1").await.unwrap().is_empty());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn update_that_leaves_the_cart_empty_keeps_no_entry() {
        let repo = InMemoryCartRepository::new();
        let cart = repo
            .update("s1", Box::new(|cart: &mut Cart| {
                cart.remove("missing");
            }))
            .await
            .unwrap();
        assert!(cart.is_empty());
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn duplicate_order_id_is_rejected() {
        let repo = InMemoryOrderRepository::new();
        let order = Order::pending("COJJ", "s1", Vec::new(), CustomerDetails::default());
        repo.save(order.clone()).await.unwrap();
        assert!(matches!(
            repo.save(order).await,
            Err(DomainError::Storage(_))
        ));
    }
}
