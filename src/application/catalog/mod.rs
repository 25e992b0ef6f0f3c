//! Catalog rendering, search and pagination

pub mod action;
pub mod controller;
pub mod pager;
pub mod view;

pub use action::CatalogAction;
pub use controller::{CatalogController, CatalogSettings, Dispatched};
pub use pager::{PageWindow, Pager, DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE};
pub use view::{CatalogView, GridView, PageButton, PaginationView, ProductCard};
