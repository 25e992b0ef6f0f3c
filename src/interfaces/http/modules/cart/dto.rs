//! Cart DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::ports::PriceFormatter;
use crate::domain::{Cart, CartLine};

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddToCartRequest {
    #[validate(length(min = 1, message = "product_id is required"))]
    pub product_id: String,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 999, message = "quantity must be between 1 and 999"))]
    pub quantity: u32,
    /// Selected size; empty when the product has none
    #[serde(default)]
    #[validate(length(max = 32))]
    pub size: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetQuantityRequest {
    /// Values below 1 are rejected here; the cart itself floors at 1
    #[validate(range(min = 1, max = 999, message = "quantity must be between 1 and 999"))]
    pub quantity: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub product_id: String,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub image: String,
    pub price: Decimal,
    pub formatted_price: String,
    pub formatted_subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub item_count: u32,
    pub total: Decimal,
    pub formatted_total: String,
}

impl CartLineResponse {
    pub fn from_line(line: &CartLine, formatter: &dyn PriceFormatter) -> Self {
        Self {
            product_id: line.product_id.clone(),
            name: line.display_name(),
            size: line.size.clone(),
            quantity: line.quantity,
            image: line.image.clone(),
            price: line.price,
            formatted_price: formatter.format_price(line.price),
            formatted_subtotal: formatter.format_price(line.subtotal()),
        }
    }
}

impl CartResponse {
    pub fn from_cart(cart: &Cart, formatter: &dyn PriceFormatter) -> Self {
        let total = cart.total();
        Self {
            lines: cart
                .lines
                .iter()
                .map(|line| CartLineResponse::from_line(line, formatter))
                .collect(),
            item_count: cart.item_count(),
            total,
            formatted_total: formatter.format_price(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use crate::infrastructure::formatting::CurrencyFormatter;

    #[test]
    fn cart_response_formats_every_amount() {
        let mut cart = Cart::new();
        cart.add(&Product::new("a", "Gown", Decimal::from(12_500)), 2, "M");
        let formatter = CurrencyFormatter::naira();

        let response = CartResponse::from_cart(&cart, &formatter);
        assert_eq!(response.item_count, 2);
        assert_eq!(response.formatted_total, "₦25,000");
        assert_eq!(response.lines[0].name, "Gown (M)");
        assert_eq!(response.lines[0].formatted_price, "₦12,500");
        assert_eq!(response.lines[0].formatted_subtotal, "₦25,000");
    }

    #[test]
    fn add_request_defaults_quantity_and_size() {
        let req: AddToCartRequest = serde_json::from_str(r#"{"product_id":"a"}"#).unwrap();
        assert_eq!(req.quantity, 1);
        assert_eq!(req.size, "");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn zero_quantity_fails_validation() {
        let req: AddToCartRequest =
            serde_json::from_str(r#"{"product_id":"a","quantity":0}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
