//! Storefront service
//!
//! Application facade over sessions, the catalog controller and the cart.
//! Controller work happens while the session entry is locked; cart calls
//! happen after the lock is released. A cart written for a session that
//! closed in the meantime is discarded when the badge refresh misses.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::cart::CartService;
use crate::application::catalog::{
    CatalogAction, CatalogController, CatalogSettings, CatalogView, Dispatched,
};
use crate::application::events::{Event, SharedEventBus};
use crate::application::ports::{CartPort, PriceFormatter};
use crate::application::session::{SharedSessionRegistry, StorefrontSession};
use crate::domain::{Cart, DomainError, DomainResult, Product};

pub struct StorefrontService {
    catalog: Arc<[Product]>,
    formatter: Arc<dyn PriceFormatter>,
    settings: CatalogSettings,
    sessions: SharedSessionRegistry,
    carts: Arc<CartService>,
    event_bus: SharedEventBus,
}

impl StorefrontService {
    pub fn new(
        catalog: Arc<[Product]>,
        formatter: Arc<dyn PriceFormatter>,
        settings: CatalogSettings,
        sessions: SharedSessionRegistry,
        carts: Arc<CartService>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            catalog,
            formatter,
            settings,
            sessions,
            carts,
            event_bus,
        }
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn product(&self, product_id: &str) -> DomainResult<&Product> {
        self.catalog
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| DomainError::not_found("Product", product_id))
    }

    pub fn formatter(&self) -> &dyn PriceFormatter {
        self.formatter.as_ref()
    }

    pub fn sessions(&self) -> &SharedSessionRegistry {
        &self.sessions
    }

    /// Start a session on page 1 of the unfiltered catalog.
    pub fn open_session(&self) -> (String, CatalogView) {
        let id = Uuid::new_v4().to_string();
        let controller = CatalogController::new(
            self.catalog.clone(),
            self.formatter.clone(),
            self.settings.clone(),
        );
        let view = controller.view();
        self.sessions.register(StorefrontSession::new(id.clone(), controller));
        self.event_bus.publish(Event::SessionOpened {
            session_id: id.clone(),
        });
        (id, view)
    }

    /// Tear a session down and discard its cart.
    pub async fn close_session(&self, session_id: &str) -> DomainResult<()> {
        self.end_session(session_id, false).await
    }

    /// Close every session idle for longer than `max_idle`. Returns how many closed.
    pub async fn expire_idle_sessions(&self, max_idle: Duration) -> DomainResult<usize> {
        let idle = self.sessions.idle_sessions(Utc::now(), max_idle);
        let mut closed = 0;
        for session_id in idle {
            match self.end_session(&session_id, true).await {
                Ok(()) => closed += 1,
                Err(DomainError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        if closed > 0 {
            info!(closed, "Expired idle storefront sessions");
        }
        Ok(closed)
    }

    pub fn view(&self, session_id: &str) -> DomainResult<CatalogView> {
        self.sessions
            .with_session(session_id, |s| s.controller.view())
            .ok_or_else(|| session_not_found(session_id))
    }

    /// Apply a UI action and return the refreshed view.
    pub async fn dispatch(
        &self,
        session_id: &str,
        action: CatalogAction,
    ) -> DomainResult<CatalogView> {
        let action_name = action.name();
        let outcome = self
            .sessions
            .with_session(session_id, |s| s.controller.dispatch(action))
            .ok_or_else(|| session_not_found(session_id))?;
        debug!(session_id, action = action_name, ?outcome, "Action dispatched");

        if let Dispatched::AddToCart {
            product_id,
            quantity,
            size,
        } = outcome
        {
            self.carts
                .add_to_cart(session_id, &product_id, quantity, &size)
                .await?;
            self.refresh_cart_count(session_id).await?;
        }

        self.view(session_id)
    }

    /// Re-read the cart count into the session's badge.
    ///
    /// When the session is gone by now, its cart is dropped as well.
    pub async fn refresh_cart_count(&self, session_id: &str) -> DomainResult<u32> {
        let count = self.carts.cart_item_count(session_id).await?;
        if self
            .sessions
            .with_session(session_id, |s| s.controller.set_cart_count(count))
            .is_none()
        {
            debug!(session_id, "Session closed during a cart change; dropping its cart");
            self.carts.clear(session_id).await?;
            return Err(session_not_found(session_id));
        }
        Ok(count)
    }

    pub fn ensure_session(&self, session_id: &str) -> DomainResult<()> {
        if self.sessions.contains(session_id) {
            Ok(())
        } else {
            Err(session_not_found(session_id))
        }
    }

    pub async fn cart(&self, session_id: &str) -> DomainResult<Cart> {
        self.ensure_session(session_id)?;
        self.carts.cart(session_id).await
    }

    pub async fn add_to_cart(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: u32,
        size: &str,
    ) -> DomainResult<Cart> {
        self.ensure_session(session_id)?;
        self.carts
            .add_to_cart(session_id, product_id, quantity, size)
            .await?;
        self.refresh_cart_count(session_id).await?;
        self.carts.cart(session_id).await
    }

    pub async fn set_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> DomainResult<Cart> {
        self.ensure_session(session_id)?;
        let cart = self
            .carts
            .set_quantity(session_id, product_id, quantity)
            .await?;
        self.refresh_cart_count(session_id).await?;
        Ok(cart)
    }

    pub async fn remove_from_cart(&self, session_id: &str, product_id: &str) -> DomainResult<Cart> {
        self.ensure_session(session_id)?;
        let cart = self.carts.remove_from_cart(session_id, product_id).await?;
        self.refresh_cart_count(session_id).await?;
        Ok(cart)
    }

    async fn end_session(&self, session_id: &str, expired: bool) -> DomainResult<()> {
        if !self.sessions.unregister(session_id) {
            return Err(session_not_found(session_id));
        }
        self.carts.clear(session_id).await?;
        self.event_bus.publish(Event::SessionClosed {
            session_id: session_id.to_string(),
            expired,
        });
        Ok(())
    }
}

fn session_not_found(session_id: &str) -> DomainError {
    DomainError::not_found("Session", session_id)
}
