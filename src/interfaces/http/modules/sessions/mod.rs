//! Browsing session endpoints: open, view, dispatch, close

pub mod dto;
pub mod handlers;

pub use handlers::*;
