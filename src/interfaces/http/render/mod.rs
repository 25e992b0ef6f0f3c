//! Server-side rendering of the catalog view model

pub mod html;

pub use html::{escape_html, render_catalog};
