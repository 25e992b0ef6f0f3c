//! Cart endpoints scoped to a browsing session

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
