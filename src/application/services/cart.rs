//! Cart service
//!
//! Adds, removes and re-quantifies cart lines for a session and publishes a
//! `CartUpdated` event after each change. Every change is a single
//! repository `update`, so concurrent requests for one session all land.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::application::events::{Event, SharedEventBus};
use crate::application::ports::CartPort;
use crate::domain::{
    Cart, CartLine, CartRepository, DomainError, DomainResult, Product, MAX_ADD_QUANTITY,
};

pub struct CartService {
    carts: Arc<dyn CartRepository>,
    catalog: Arc<[Product]>,
    event_bus: SharedEventBus,
}

impl CartService {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        catalog: Arc<[Product]>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            carts,
            catalog,
            event_bus,
        }
    }

    pub async fn cart(&self, session_id: &str) -> DomainResult<Cart> {
        self.carts.load(session_id).await
    }

    pub async fn remove_from_cart(&self, session_id: &str, product_id: &str) -> DomainResult<Cart> {
        let mut removed = false;
        let cart = self
            .carts
            .update(
                session_id,
                Box::new(|cart: &mut Cart| removed = cart.remove(product_id)),
            )
            .await?;
        if removed {
            self.publish(session_id, product_id, &cart);
        }
        Ok(cart)
    }

    /// Quantities below 1 are raised to 1; unknown products leave the cart untouched.
    pub async fn set_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> DomainResult<Cart> {
        let mut changed = false;
        let cart = self
            .carts
            .update(
                session_id,
                Box::new(|cart: &mut Cart| changed = cart.set_quantity(product_id, quantity)),
            )
            .await?;
        if changed {
            self.publish(session_id, product_id, &cart);
        }
        Ok(cart)
    }

    pub async fn clear(&self, session_id: &str) -> DomainResult<()> {
        self.carts.take(session_id).await.map(|_| ())
    }

    /// Empty the cart and hand its contents to the caller in one step.
    pub async fn take(&self, session_id: &str) -> DomainResult<Cart> {
        self.carts.take(session_id).await
    }

    /// Put lines back in front of whatever the session added meanwhile.
    pub async fn restore(&self, session_id: &str, lines: Vec<CartLine>) -> DomainResult<Cart> {
        self.carts
            .update(
                session_id,
                Box::new(move |cart: &mut Cart| {
                    let newer = std::mem::replace(&mut cart.lines, lines);
                    for line in newer {
                        match cart
                            .lines
                            .iter_mut()
                            .find(|l| l.product_id == line.product_id && l.size == line.size)
                        {
                            Some(existing) => {
                                existing.quantity = existing.quantity.saturating_add(line.quantity)
                            }
                            None => cart.lines.push(line),
                        }
                    }
                }),
            )
            .await
    }

    fn publish(&self, session_id: &str, product_id: &str, cart: &Cart) {
        self.event_bus.publish(Event::CartUpdated {
            session_id: session_id.to_string(),
            product_id: product_id.to_string(),
            cart_count: cart.item_count(),
        });
    }
}

#[async_trait]
impl CartPort for CartService {
    async fn add_to_cart(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: u32,
        size: &str,
    ) -> DomainResult<CartLine> {
        if !(1..=MAX_ADD_QUANTITY).contains(&quantity) {
            return Err(DomainError::Validation(format!(
                "quantity must be between 1 and {}",
                MAX_ADD_QUANTITY
            )));
        }
        let product = self
            .catalog
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| DomainError::not_found("Product", product_id))?;

        let mut added = None;
        let cart = self
            .carts
            .update(
                session_id,
                Box::new(|cart: &mut Cart| added = Some(cart.add(product, quantity, size).clone())),
            )
            .await?;
        let line = added.ok_or_else(|| {
            DomainError::Storage(format!("cart update for {} was not applied", session_id))
        })?;
        self.publish(session_id, product_id, &cart);

        metrics::counter!("cart_additions_total").increment(1);
        info!(
            session_id,
            product = %line.display_name(),
            quantity,
            "Added to cart"
        );
        Ok(line)
    }

    async fn cart_item_count(&self, session_id: &str) -> DomainResult<u32> {
        let count = self.carts.load(session_id).await?.item_count();
        debug!(session_id, count, "Cart count refreshed");
        Ok(count)
    }
}
