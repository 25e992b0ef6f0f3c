//! Product DTOs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::ports::PriceFormatter;
use crate::domain::Product;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub formatted_price: String,
    pub image: String,
    pub images: Vec<String>,
    pub specs: String,
    pub category: String,
    pub subcategory: String,
    pub size_type: String,
}

impl ProductResponse {
    pub fn from_product(product: &Product, formatter: &dyn PriceFormatter) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            formatted_price: formatter.format_price(product.price),
            image: product.image.clone(),
            images: product.images.clone(),
            specs: product.specs.clone(),
            category: product.category.clone(),
            subcategory: product.subcategory.clone(),
            size_type: product.size_type.clone(),
        }
    }
}
