//! Order DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::ports::PriceFormatter;
use crate::domain::{CustomerDetails, Order};
use crate::interfaces::http::modules::cart::CartLineResponse;

/// Checkout form
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct SubmitOrderRequest {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "phone must be 7-20 characters"))]
    pub phone: String,
    #[validate(length(min = 1, max = 500, message = "address is required"))]
    pub address: String,
    /// e.g. `delivery` or `pickup`
    #[validate(length(min = 1, max = 40, message = "fulfillment_method is required"))]
    pub fulfillment_method: String,
    /// e.g. `transfer` or `card`
    #[validate(length(min = 1, max = 40, message = "payment_method is required"))]
    pub payment_method: String,
    #[serde(default)]
    pub color_preference: Option<String>,
    #[serde(default)]
    #[validate(url(message = "payment_receipt_url must be a URL"))]
    pub payment_receipt_url: Option<String>,
}

impl From<SubmitOrderRequest> for CustomerDetails {
    fn from(req: SubmitOrderRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            fulfillment_method: req.fulfillment_method,
            payment_method: req.payment_method,
            color_preference: req.color_preference.filter(|c| !c.trim().is_empty()),
            payment_receipt_url: req.payment_receipt_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitOrderResponse {
    pub order_id: Uuid,
    pub order_number: String,
    pub formatted_total: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDto {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub fulfillment_method: String,
    pub payment_method: String,
    pub color_preference: Option<String>,
    pub payment_receipt_url: Option<String>,
}

impl From<CustomerDetails> for CustomerDto {
    fn from(c: CustomerDetails) -> Self {
        Self {
            name: c.name,
            email: c.email,
            phone: c.phone,
            address: c.address,
            fulfillment_method: c.fulfillment_method,
            payment_method: c.payment_method,
            color_preference: c.color_preference,
            payment_receipt_url: c.payment_receipt_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub status: String,
    pub items: Vec<CartLineResponse>,
    pub total_amount: Decimal,
    pub formatted_total: String,
    pub customer: CustomerDto,
    pub created_at: DateTime<Utc>,
}

impl OrderResponse {
    pub fn from_order(order: Order, formatter: &dyn PriceFormatter) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number.to_string(),
            status: order.status.to_string(),
            items: order
                .items
                .iter()
                .map(|line| CartLineResponse::from_line(line, formatter))
                .collect(),
            total_amount: order.total_amount,
            formatted_total: formatter.format_price(order.total_amount),
            customer: order.customer.into(),
            created_at: order.created_at,
        }
    }
}
