//! Cart REST API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{AddToCartRequest, CartResponse, SetQuantityRequest};
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::state::StorefrontState;

#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}/cart",
    tag = "Cart",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Cart contents", body = ApiResponse<CartResponse>),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_cart(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
) -> ApiResult<CartResponse> {
    let cart = state.storefront.cart(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(CartResponse::from_cart(
        &cart,
        state.storefront.formatter(),
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/cart/items",
    tag = "Cart",
    params(("id" = String, Path, description = "Session ID")),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Item added", body = ApiResponse<CartResponse>),
        (status = 404, description = "Unknown session or product"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn add_item(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<AddToCartRequest>,
) -> ApiResult<CartResponse> {
    let cart = state
        .storefront
        .add_to_cart(&id, &req.product_id, req.quantity, &req.size)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(CartResponse::from_cart(
        &cart,
        state.storefront.formatter(),
    ))))
}

#[utoipa::path(
    put,
    path = "/api/v1/sessions/{id}/cart/items/{product_id}",
    tag = "Cart",
    params(
        ("id" = String, Path, description = "Session ID"),
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ApiResponse<CartResponse>),
        (status = 404, description = "Unknown session"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn set_item_quantity(
    State(state): State<StorefrontState>,
    Path((id, product_id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<SetQuantityRequest>,
) -> ApiResult<CartResponse> {
    let cart = state
        .storefront
        .set_quantity(&id, &product_id, req.quantity)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(CartResponse::from_cart(
        &cart,
        state.storefront.formatter(),
    ))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{id}/cart/items/{product_id}",
    tag = "Cart",
    params(
        ("id" = String, Path, description = "Session ID"),
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartResponse>),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn remove_item(
    State(state): State<StorefrontState>,
    Path((id, product_id)): Path<(String, String)>,
) -> ApiResult<CartResponse> {
    let cart = state
        .storefront
        .remove_from_cart(&id, &product_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(CartResponse::from_cart(
        &cart,
        state.storefront.formatter(),
    ))))
}
