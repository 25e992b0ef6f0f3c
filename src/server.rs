//! Reusable storefront server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: catalog load, service wiring,
//! session expiry, metrics, the REST API and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{debug, error, info};

use crate::application::events::{create_event_bus, Event, SharedEventBus};
use crate::application::ports::{PriceFormatter, ProductSource};
use crate::application::services::{CartService, OrderService, SessionExpiry, StorefrontService};
use crate::application::session::{SessionRegistry, SharedSessionRegistry};
use crate::config::AppConfig;
use crate::domain::{CartRepository, OrderRepository, Product};
use crate::infrastructure::catalog::JsonFileProductSource;
use crate::infrastructure::storage::{InMemoryCartRepository, InMemoryOrderRepository};
use crate::interfaces::http::{create_api_router, AppState};
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Wired application services over one catalog.
pub struct Services {
    pub storefront: Arc<StorefrontService>,
    pub orders: Arc<OrderService>,
    pub carts: Arc<CartService>,
    pub sessions: SharedSessionRegistry,
    pub event_bus: SharedEventBus,
}

impl Services {
    pub fn build(catalog: Vec<Product>, config: &AppConfig) -> Self {
        let catalog: Arc<[Product]> = catalog.into();
        let event_bus = create_event_bus();
        let sessions = SessionRegistry::shared();

        let cart_repo: Arc<dyn CartRepository> = Arc::new(InMemoryCartRepository::new());
        let order_repo: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository::new());
        let formatter: Arc<dyn PriceFormatter> = Arc::new(config.price_formatter());

        let carts = Arc::new(CartService::new(
            cart_repo,
            catalog.clone(),
            event_bus.clone(),
        ));
        let orders = Arc::new(OrderService::new(
            order_repo,
            carts.clone(),
            event_bus.clone(),
            config.orders.number_prefix.clone(),
        ));
        let storefront = Arc::new(StorefrontService::new(
            catalog,
            formatter,
            config.catalog_settings(),
            sessions.clone(),
            carts.clone(),
            event_bus.clone(),
        ));

        Self {
            storefront,
            orders,
            carts,
            sessions,
            event_bus,
        }
    }
}

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run the idle-session sweep (default: true).
    pub expire_sessions: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            expire_sessions: true,
        }
    }
}

/// Handle to a running storefront server.
///
/// ```rust,no_run
/// use storefront::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub storefront: Arc<StorefrontService>,
    pub orders: Arc<OrderService>,
    pub event_bus: SharedEventBus,
    pub config: AppConfig,
    /// Address actually bound; differs from the config when port 0 was requested.
    pub local_addr: SocketAddr,

    shutdown: ShutdownCoordinator,
    expiry: Option<SessionExpiry>,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting storefront...");

        let prometheus_handle = prometheus_handle()?;

        // ── Catalog ────────────────────────────────────────────
        let source = JsonFileProductSource::new(app_cfg.catalog.products_path.clone());
        let catalog = source.load_catalog().await?;

        let services = Services::build(catalog, &app_cfg);

        // ── Shutdown & background tasks ────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        spawn_event_log(&services.event_bus, shutdown_signal.clone());

        let expiry = if opts.expire_sessions {
            let expiry = SessionExpiry::new(services.storefront.clone())
                .with_config(app_cfg.session_expiry());
            expiry.start(shutdown_signal.clone());
            Some(expiry)
        } else {
            None
        };

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(AppState {
            storefront: services.storefront.clone(),
            orders: services.orders.clone(),
            metrics: prometheus_handle,
            started_at: Arc::new(Instant::now()),
        });

        let api_addr = app_cfg.api_address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            storefront: services.storefront,
            orders: services.orders,
            event_bus: services.event_bus,
            config: app_cfg,
            local_addr,
            shutdown,
            expiry,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install SIGTERM / SIGINT listeners that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the API server to drain, bounded by `server.shutdown_timeout`.
    pub async fn wait(self) {
        let Self {
            shutdown,
            api_task,
            storefront,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                if let Err(e) = api_task.await {
                    error!("REST API server task panicked: {}", e);
                }
            })
            .await;
        if drained {
            info!("REST API server stopped");
        }

        info!(
            open_sessions = storefront.sessions().count(),
            "Storefront shutdown complete"
        );
    }

    pub async fn shutdown(self) {
        info!("Shutting down storefront...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub async fn is_running(&self) -> bool {
        let expiry_running = match &self.expiry {
            Some(expiry) => expiry.is_running().await,
            None => false,
        };
        !self.api_task.is_finished() || expiry_running
    }
}

/// Log every storefront event until shutdown.
fn spawn_event_log(event_bus: &SharedEventBus, shutdown: ShutdownSignal) {
    let mut subscriber = event_bus.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                message = subscriber.recv() => {
                    let Some(message) = message else { break };
                    match &message.event {
                        Event::OrderSubmitted { order_number, total_amount, .. } => info!(
                            event_id = %message.id,
                            order_number = %order_number,
                            total = %total_amount,
                            "order.submitted"
                        ),
                        event => debug!(
                            event_id = %message.id,
                            session_id = event.session_id(),
                            event_type = event.event_type(),
                            "storefront event"
                        ),
                    }
                }
                _ = shutdown.notified().wait() => break,
            }
        }
    });
}

/// The global recorder can only be installed once per process; later
/// starts reuse the first handle.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Initialize tracing from the `[logging]` section. `RUST_LOG` wins when set.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
