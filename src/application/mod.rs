//! Application layer
//!
//! Catalog controller, collaborator ports, services and session handling.

pub mod catalog;
pub mod events;
pub mod ports;
pub mod services;
pub mod session;

pub use catalog::{CatalogAction, CatalogController, CatalogSettings, CatalogView};
pub use events::{create_event_bus, Event, EventBus, SharedEventBus};
pub use ports::{CartPort, PriceFormatter, ProductSource};
pub use services::{CartService, OrderService, SessionExpiry, StorefrontService};
pub use session::{SessionRegistry, SharedSessionRegistry};
