//! Cart aggregate
//!
//! Contains the per-session cart, its lines and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Cart, CartLine, MAX_ADD_QUANTITY};
pub use repository::{CartMutation, CartRepository};
