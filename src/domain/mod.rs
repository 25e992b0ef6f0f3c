//! Domain layer
//!
//! Core business entities, repository interfaces and errors.

pub mod cart;
pub mod error;
pub mod order;
pub mod product;

pub use cart::{Cart, CartLine, CartMutation, CartRepository, MAX_ADD_QUANTITY};
pub use error::{DomainError, DomainResult};
pub use order::{CustomerDetails, Order, OrderNumber, OrderRepository, OrderStatus};
pub use product::{Product, SearchTerm};
