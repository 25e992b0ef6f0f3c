//! Infrastructure layer - external concerns

pub mod catalog;
pub mod formatting;
pub mod storage;

pub use catalog::JsonFileProductSource;
pub use formatting::CurrencyFormatter;
pub use storage::{InMemoryCartRepository, InMemoryOrderRepository};
