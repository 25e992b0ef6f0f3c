//! Browsing sessions
//!
//! Each session owns one catalog controller. Sessions are created when a
//! shopper opens the storefront and torn down on close or idle expiry.

pub mod registry;

pub use registry::{SessionRegistry, SharedSessionRegistry, StorefrontSession};
