//! Order service
//!
//! Turns a session's cart into a pending order.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::cart::CartService;
use crate::application::events::{Event, SharedEventBus};
use crate::domain::{CustomerDetails, DomainError, DomainResult, Order, OrderRepository};

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    carts: Arc<CartService>,
    event_bus: SharedEventBus,
    number_prefix: String,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        carts: Arc<CartService>,
        event_bus: SharedEventBus,
        number_prefix: impl Into<String>,
    ) -> Self {
        Self {
            orders,
            carts,
            event_bus,
            number_prefix: number_prefix.into(),
        }
    }

    /// Store the session's cart as a pending order and empty the cart.
    ///
    /// The cart is taken in one step, so a line added while the order is
    /// being stored stays in the cart for the next order.
    pub async fn submit_order(
        &self,
        session_id: &str,
        customer: CustomerDetails,
    ) -> DomainResult<Order> {
        let cart = self.carts.take(session_id).await?;
        if cart.is_empty() {
            warn!(session_id, "Order rejected: cart is empty");
            return Err(DomainError::EmptyCart);
        }

        let order = Order::pending(&self.number_prefix, session_id, cart.lines.clone(), customer);
        let order = match self.orders.save(order).await {
            Ok(order) => order,
            Err(e) => {
                warn!(session_id, error = %e, "Order not stored; returning lines to the cart");
                self.carts.restore(session_id, cart.lines).await?;
                return Err(e);
            }
        };

        metrics::counter!("orders_submitted_total").increment(1);
        info!(
            session_id,
            order_number = %order.order_number,
            total = %order.total_amount,
            "Order submitted"
        );
        self.event_bus.publish(Event::OrderSubmitted {
            session_id: session_id.to_string(),
            order_number: order.order_number.to_string(),
            total_amount: order.total_amount,
        });
        Ok(order)
    }

    pub async fn get_order(&self, id: Uuid) -> DomainResult<Order> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id.to_string()))
    }

    pub async fn orders_for_session(&self, session_id: &str) -> DomainResult<Vec<Order>> {
        self.orders.find_by_session(session_id).await
    }
}
