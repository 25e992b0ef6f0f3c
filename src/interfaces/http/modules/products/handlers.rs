//! Product REST API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::ProductResponse;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult};
use crate::interfaces::http::state::StorefrontState;

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_product(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
) -> ApiResult<ProductResponse> {
    let product = state.storefront.product(&id).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(ProductResponse::from_product(
        product,
        state.storefront.formatter(),
    ))))
}
