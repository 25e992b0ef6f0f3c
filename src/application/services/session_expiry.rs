//! Session expiry task
//!
//! Periodically closes storefront sessions nobody has touched for a while.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::storefront::StorefrontService;
use crate::support::shutdown::ShutdownSignal;

#[derive(Debug, Clone)]
pub struct SessionExpiryConfig {
    /// How often to look for idle sessions (in seconds)
    pub sweep_interval_secs: u64,
    /// Idle time after which a session is closed (in seconds)
    pub idle_timeout_secs: u64,
}

impl Default for SessionExpiryConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 60,
            idle_timeout_secs: 1800,
        }
    }
}

pub struct SessionExpiry {
    storefront: Arc<StorefrontService>,
    config: SessionExpiryConfig,
    running: Arc<RwLock<bool>>,
}

impl SessionExpiry {
    pub fn new(storefront: Arc<StorefrontService>) -> Self {
        Self {
            storefront,
            config: SessionExpiryConfig::default(),
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub fn with_config(mut self, config: SessionExpiryConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the background sweep; it stops when `shutdown` fires.
    pub fn start(&self, shutdown: ShutdownSignal) {
        let storefront = self.storefront.clone();
        let config = self.config.clone();
        let running = self.running.clone();

        tokio::spawn(async move {
            *running.write().await = true;
            info!(
                sweep_interval_secs = config.sweep_interval_secs,
                idle_timeout_secs = config.idle_timeout_secs,
                "Session expiry started"
            );

            let max_idle = idle_limit(config.idle_timeout_secs);
            let mut interval =
                tokio::time::interval(Duration::from_secs(config.sweep_interval_secs.max(1)));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = storefront.expire_idle_sessions(max_idle).await {
                            warn!(error = %e, "Session expiry sweep failed");
                        }
                    }
                    _ = shutdown.notified().wait() => {
                        info!("Session expiry shutting down");
                        break;
                    }
                }
            }

            *running.write().await = false;
        });
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }
}

/// Timeouts too large for a `TimeDelta` saturate, so such sessions never expire.
fn idle_limit(idle_timeout_secs: u64) -> TimeDelta {
    i64::try_from(idle_timeout_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::catalog::CatalogSettings;
    use crate::application::events::EventBus;
    use crate::application::services::CartService;
    use crate::application::session::SessionRegistry;
    use crate::infrastructure::formatting::CurrencyFormatter;
    use crate::infrastructure::storage::InMemoryCartRepository;
    use crate::domain::Product;

    fn storefront() -> Arc<StorefrontService> {
        let catalog: Arc<[Product]> = Vec::new().into();
        let bus = Arc::new(EventBus::new());
        let carts = Arc::new(CartService::new(
            Arc::new(InMemoryCartRepository::new()),
            catalog.clone(),
            bus.clone(),
        ));
        Arc::new(StorefrontService::new(
            catalog,
            Arc::new(CurrencyFormatter::naira()),
            CatalogSettings::default(),
            SessionRegistry::shared(),
            carts,
            bus,
        ))
    }

    #[test]
    fn huge_idle_timeout_saturates() {
        assert_eq!(idle_limit(1800), TimeDelta::minutes(30));
        assert_eq!(idle_limit(u64::MAX), TimeDelta::MAX);
        assert_eq!(idle_limit(i64::MAX as u64), TimeDelta::MAX);
    }

    #[tokio::test]
    async fn sweep_survives_huge_idle_timeout() {
        let storefront = storefront();
        storefront.open_session();
        let expiry = SessionExpiry::new(storefront.clone()).with_config(SessionExpiryConfig {
            sweep_interval_secs: 1,
            idle_timeout_secs: u64::MAX,
        });
        let shutdown = ShutdownSignal::new();
        expiry.start(shutdown.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(expiry.is_running().await);
        assert_eq!(storefront.sessions().count(), 1);
        shutdown.trigger();
    }

    #[tokio::test]
    async fn stops_on_shutdown() {
        let expiry = SessionExpiry::new(storefront()).with_config(SessionExpiryConfig {
            sweep_interval_secs: 1,
            idle_timeout_secs: 1,
        });
        let shutdown = ShutdownSignal::new();
        expiry.start(shutdown.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(expiry.is_running().await);

        shutdown.trigger();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!expiry.is_running().await);
    }
}
