//! In-memory repository implementations

mod memory;

pub use memory::{InMemoryCartRepository, InMemoryOrderRepository};
