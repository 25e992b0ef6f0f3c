//! Product aggregate
//!
//! Catalog entries as loaded from the product source. Read-only for the
//! lifetime of a browsing session.

pub mod model;

pub use model::{Product, SearchTerm};
