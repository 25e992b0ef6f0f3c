//! Catalog view model
//!
//! The render description produced by the catalog controller. Nothing here
//! knows about a document or markup; the HTTP layer turns it into JSON or an
//! HTML fragment.

use serde::Serialize;
use utoipa::ToSchema;

/// One product tile in the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductCard {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub formatted_price: String,
    /// Link to the product detail page, keyed by the percent-encoded id
    pub detail_href: String,
}

/// Content of the product grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GridView {
    /// The catalog itself is empty
    NoProducts { message: String },
    /// The catalog has products but none match the search
    NoMatches { term: String },
    /// Cards for the current page
    Cards { cards: Vec<ProductCard> },
}

impl GridView {
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            Self::Cards { cards } => cards,
            _ => &[],
        }
    }
}

/// A page-number button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageButton {
    pub page: usize,
    pub active: bool,
}

/// Page-index widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationView {
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub buttons: Vec<PageButton>,
}

impl PaginationView {
    pub fn active_page(&self) -> Option<usize> {
        self.buttons.iter().find(|b| b.active).map(|b| b.page)
    }
}

/// Everything a client needs to draw the catalog page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogView {
    pub search_term: String,
    pub grid: GridView,
    pub pagination: PaginationView,
    /// Badge value: total quantity in the session's cart
    pub cart_count: u32,
    /// Set after page navigation so the client brings the grid into view
    pub scroll_to_grid: bool,
}
