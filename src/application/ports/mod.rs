//! Ports to the collaborators the storefront core relies on

pub mod outbound;

pub use outbound::{CartPort, PriceFormatter, ProductSource};
