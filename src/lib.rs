//! # Storefront
//!
//! Catalog browsing service: product search, pagination, cart and checkout.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Products, carts, orders and their repository traits
//! - **application**: Catalog controller, sessions, services and ports
//! - **infrastructure**: Product sources, price formatting, in-memory storage
//! - **interfaces**: REST API with Swagger documentation and HTML fragments
//! - **server**: Runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

pub use application::{
    create_event_bus, CatalogAction, CatalogController, CatalogView, Event, EventBus,
    SharedEventBus,
};
pub use interfaces::create_api_router;
