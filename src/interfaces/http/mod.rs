//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `modules`: handlers and DTOs per resource
//! - `render`: HTML fragment adapter over the catalog view model
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod render;
pub mod router;
pub mod state;

pub use router::{create_api_router, AppState};
