//! HTML fragment renderer
//!
//! Turns a [`CatalogView`] into markup. Interactive controls carry
//! `data-action` plus the data the action needs; a single listener on the
//! catalog container posts them back to the session's `events` endpoint.

use std::fmt::Write;

use crate::application::catalog::action::names;
use crate::application::catalog::{CatalogView, GridView, PaginationView, ProductCard};

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_catalog(view: &CatalogView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<section class="catalog" data-delegate="catalog"><span id="cartCount" class="cart-count">{}</span><input id="searchInput" type="search" data-action="{}" value="{}" />"#,
        view.cart_count,
        names::SEARCH,
        escape_html(&view.search_term),
    );
    html.push_str(&render_grid(&view.grid));
    html.push_str(&render_pagination(&view.pagination));
    html.push_str("</section>");
    html
}

fn render_grid(grid: &GridView) -> String {
    let mut html = String::from(r#"<div id="productsGrid" class="grid">"#);
    match grid {
        GridView::NoProducts { message } => {
            let _ = write!(html, r#"<p class="empty">{}</p>"#, escape_html(message));
        }
        GridView::NoMatches { term } => {
            let _ = write!(
                html,
                r#"<p class="empty">No products match "{}".</p>"#,
                escape_html(term)
            );
        }
        GridView::Cards { cards } => {
            for card in cards {
                html.push_str(&render_card(card));
            }
        }
    }
    html.push_str("</div>");
    html
}

fn render_card(card: &ProductCard) -> String {
    let name = escape_html(&card.name);
    format!(
        concat!(
            r#"<article class="card" aria-label="{name}">"#,
            r#"<img src="{image}" alt="{name}" loading="lazy" />"#,
            r#"<div class="content"><h3>{name}</h3><div class="price">{price}</div></div>"#,
            r#"<div class="actions">"#,
            r#"<a class="btn" href="{href}" aria-label="View {name}">View</a>"#,
            r#"<button type="button" class="add" data-action="{action}" data-id="{id}">Add to Cart</button>"#,
            r#"</div></article>"#,
        ),
        name = name,
        image = escape_html(&card.image),
        price = escape_html(&card.formatted_price),
        href = escape_html(&card.detail_href),
        action = names::ADD_TO_CART,
        id = escape_html(&card.product_id),
    )
}

fn render_pagination(pagination: &PaginationView) -> String {
    let mut html = String::from(r#"<nav id="pagination" class="pagination">"#);
    let _ = write!(
        html,
        r#"<button type="button" id="prevPage" data-action="{}"{}>Previous</button>"#,
        names::PREVIOUS_PAGE,
        disabled(!pagination.previous_enabled),
    );
    html.push_str(r#"<div id="pageNumbers">"#);
    for button in &pagination.buttons {
        let _ = write!(
            html,
            r#"<button type="button" class="page-number{}" data-action="{}" data-page="{}">{}</button>"#,
            if button.active { " active" } else { "" },
            names::GO_TO_PAGE,
            button.page,
            button.page,
        );
    }
    html.push_str("</div>");
    let _ = write!(
        html,
        r#"<button type="button" id="nextPage" data-action="{}"{}>Next</button>"#,
        names::NEXT_PAGE,
        disabled(!pagination.next_enabled),
    );
    html.push_str("</nav>");
    html
}

fn disabled(flag: bool) -> &'static str {
    if flag {
        " disabled"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::catalog::PageButton;

    fn view(grid: GridView, pagination: PaginationView) -> CatalogView {
        CatalogView {
            search_term: String::new(),
            grid,
            pagination,
            cart_count: 2,
            scroll_to_grid: false,
        }
    }

    fn single_page() -> PaginationView {
        PaginationView {
            total_items: 1,
            total_pages: 1,
            current_page: 1,
            previous_enabled: false,
            next_enabled: false,
            buttons: vec![PageButton {
                page: 1,
                active: true,
            }],
        }
    }

    #[test]
    fn card_carries_link_and_add_action() {
        let html = render_catalog(&view(
            GridView::Cards {
                cards: vec![ProductCard {
                    product_id: "a".into(),
                    name: "Phone X".into(),
                    image: "img/phone.jpg".into(),
                    formatted_price: "₦5,000".into(),
                    detail_href: "product.html?id=a".into(),
                }],
            },
            single_page(),
        ));
        assert!(html.contains(r#"href="product.html?id=a""#));
        assert!(html.contains(r#"data-action="add-to-cart" data-id="a""#));
        assert!(html.contains("₦5,000"));
        assert!(html.contains(r#"<span id="cartCount" class="cart-count">2</span>"#));
    }

    #[test]
    fn navigation_reflects_enabled_state() {
        let html = render_catalog(&view(GridView::Cards { cards: vec![] }, single_page()));
        assert!(html.contains(r#"id="prevPage" data-action="previous-page" disabled"#));
        assert!(html.contains(r#"id="nextPage" data-action="next-page" disabled"#));
        assert!(html.contains(
            r#"class="page-number active" data-action="go-to-page" data-page="1""#
        ));
    }

    #[test]
    fn text_is_escaped() {
        let html = render_catalog(&view(
            GridView::NoMatches {
                term: "<script>".into(),
            },
            PaginationView {
                total_items: 0,
                total_pages: 0,
                current_page: 1,
                previous_enabled: false,
                next_enabled: false,
                buttons: vec![],
            },
        ));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("page-number"));
    }

    #[test]
    fn escape_covers_attribute_quotes() {
        assert_eq!(escape_html(r#"a"b'c&"#), "a&quot;b&#39;c&amp;");
    }
}
