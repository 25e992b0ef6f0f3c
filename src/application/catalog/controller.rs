//! Catalog controller
//!
//! Owns the filtered and paginated view of one session's catalog and keeps
//! the grid and page-index widget consistent with it. All operations are
//! synchronous; a new search simply overwrites the previous state.

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

use super::action::CatalogAction;
use super::pager::{Pager, DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE};
use super::view::{CatalogView, GridView, PageButton, PaginationView, ProductCard};
use crate::application::ports::PriceFormatter;
use crate::domain::{Product, SearchTerm};

const NO_PRODUCTS_MESSAGE: &str = "Loading products... If nothing appears, please reload Home.";

/// Bytes JavaScript's `encodeURIComponent` escapes
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Per-controller display settings, fixed for the controller's lifetime
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub page_size: usize,
    pub max_visible_pages: usize,
    /// Detail page the card links to; the product id is appended as `?id=`
    pub detail_page: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            detail_page: "product.html".to_string(),
        }
    }
}

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// State changed and the view was re-rendered
    Rendered,
    /// Out-of-range navigation; nothing changed
    Ignored,
    /// The caller must hand this to the cart collaborator, then refresh the badge
    AddToCart {
        product_id: String,
        quantity: u32,
        size: String,
    },
}

pub struct CatalogController {
    catalog: Arc<[Product]>,
    formatter: Arc<dyn PriceFormatter>,
    pager: Pager,
    detail_page: String,
    term: SearchTerm,
    /// Indices into `catalog`, in catalog order
    filtered: Vec<usize>,
    current_page: usize,
    grid: GridView,
    pagination: PaginationView,
    cart_count: u32,
    scroll_to_grid: bool,
}

impl CatalogController {
    /// Build a controller showing page 1 of the unfiltered catalog.
    pub fn new(
        catalog: Arc<[Product]>,
        formatter: Arc<dyn PriceFormatter>,
        settings: CatalogSettings,
    ) -> Self {
        let filtered = (0..catalog.len()).collect();
        let mut controller = Self {
            catalog,
            formatter,
            pager: Pager::new(settings.page_size, settings.max_visible_pages),
            detail_page: settings.detail_page,
            term: SearchTerm::default(),
            filtered,
            current_page: 1,
            grid: GridView::Cards { cards: Vec::new() },
            pagination: PaginationView {
                total_items: 0,
                total_pages: 0,
                current_page: 1,
                previous_enabled: false,
                next_enabled: false,
                buttons: Vec::new(),
            },
            cart_count: 0,
            scroll_to_grid: false,
        };
        controller.refresh();
        controller
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.catalog.iter().find(|p| p.id == id)
    }

    pub fn search_term(&self) -> &str {
        self.term.as_str()
    }

    pub fn filtered_products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.filtered.iter().map(|&i| &self.catalog[i])
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.filtered.len())
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    pub fn view(&self) -> CatalogView {
        CatalogView {
            search_term: self.term.as_str().to_string(),
            grid: self.grid.clone(),
            pagination: self.pagination.clone(),
            cart_count: self.cart_count,
            scroll_to_grid: self.scroll_to_grid,
        }
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Filter the full catalog by name or spec text, ignoring case, and go
    /// back to page 1.
    pub fn search(&mut self, term: &str) {
        self.term = SearchTerm::new(term);
        self.filtered = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, p)| p.matches(&self.term))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;
        self.scroll_to_grid = false;
        metrics::counter!("catalog_searches_total").increment(1);
        debug!(
            term = self.term.as_str(),
            matches = self.filtered.len(),
            "Catalog searched"
        );
        self.refresh();
    }

    /// Show page `page`. Pages outside `[1, total_pages]` are ignored.
    ///
    /// Returns whether the page changed the view.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.total_pages();
        if page < 1 || page > total {
            debug!(page, total, "Ignoring out-of-range page");
            return false;
        }
        self.current_page = page;
        self.scroll_to_grid = true;
        self.refresh();
        true
    }

    pub fn previous_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page.saturating_add(1))
    }

    /// Update the cart badge after a cart mutation.
    pub fn set_cart_count(&mut self, count: u32) {
        self.cart_count = count;
        self.scroll_to_grid = false;
    }

    /// Apply a delegated UI action.
    ///
    /// The scroll request only survives into the view of the page change
    /// that raised it.
    pub fn dispatch(&mut self, action: CatalogAction) -> Dispatched {
        self.scroll_to_grid = false;
        let changed = match action {
            CatalogAction::Search { term } => {
                self.search(&term);
                true
            }
            CatalogAction::GoToPage { page } => self.go_to_page(page),
            CatalogAction::PreviousPage => self.previous_page(),
            CatalogAction::NextPage => self.next_page(),
            CatalogAction::AddToCart {
                product_id,
                quantity,
                size,
            } => {
                return Dispatched::AddToCart {
                    product_id,
                    quantity,
                    size,
                }
            }
        };

        if changed {
            Dispatched::Rendered
        } else {
            Dispatched::Ignored
        }
    }

    // ── Rendering ──────────────────────────────────────────────

    /// Cards for `items[(page-1)*page_size .. page*page_size]`.
    pub fn render(&self, items: &[&Product], page: usize) -> GridView {
        if self.catalog.is_empty() {
            return GridView::NoProducts {
                message: NO_PRODUCTS_MESSAGE.to_string(),
            };
        }
        if items.is_empty() {
            return GridView::NoMatches {
                term: self.term.as_str().to_string(),
            };
        }

        let cards = self
            .pager
            .page_of(items, page)
            .iter()
            .map(|product| self.card(product))
            .collect();
        GridView::Cards { cards }
    }

    /// Page-index widget for `total_items` results with `page` current.
    pub fn render_pagination(&self, total_items: usize, page: usize) -> PaginationView {
        let total_pages = self.pager.total_pages(total_items);
        let window = self.pager.window(total_pages, page);
        let buttons = window
            .pages()
            .map(|p| PageButton {
                page: p,
                active: p == page,
            })
            .collect();

        PaginationView {
            total_items,
            total_pages,
            current_page: page,
            previous_enabled: page > 1,
            next_enabled: page < total_pages,
            buttons,
        }
    }

    fn card(&self, product: &Product) -> ProductCard {
        ProductCard {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            formatted_price: self.formatter.format_price(product.price),
            detail_href: format!(
                "{}?id={}",
                self.detail_page,
                utf8_percent_encode(&product.id, URI_COMPONENT)
            ),
        }
    }

    /// Re-derive grid and pagination from the current query state.
    fn refresh(&mut self) {
        let total_pages = self.total_pages();
        if total_pages > 0 && self.current_page > total_pages {
            self.current_page = total_pages;
        }
        if self.current_page == 0 {
            self.current_page = 1;
        }

        let items: Vec<&Product> = self.filtered_products().collect();
        let grid = self.render(&items, self.current_page);
        let pagination = self.render_pagination(items.len(), self.current_page);
        self.grid = grid;
        self.pagination = pagination;
    }
}
