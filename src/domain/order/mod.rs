//! Order aggregate

pub mod model;
pub mod repository;

pub use model::{CustomerDetails, Order, OrderNumber, OrderStatus};
pub use repository::OrderRepository;
