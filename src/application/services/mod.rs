//! Application services

pub mod cart;
pub mod orders;
pub mod session_expiry;
pub mod storefront;

pub use cart::CartService;
pub use orders::OrderService;
pub use session_expiry::{SessionExpiry, SessionExpiryConfig};
pub use storefront::StorefrontService;
