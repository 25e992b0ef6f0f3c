//! Order REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{OrderResponse, SubmitOrderRequest, SubmitOrderResponse};
use crate::application::ports::PriceFormatter;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::state::StorefrontState;

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/orders",
    tag = "Orders",
    params(("id" = String, Path, description = "Session ID")),
    request_body = SubmitOrderRequest,
    responses(
        (status = 201, description = "Order placed, cart emptied", body = ApiResponse<SubmitOrderResponse>),
        (status = 400, description = "Cart is empty"),
        (status = 404, description = "Unknown session"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn submit_order(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<SubmitOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmitOrderResponse>>), ApiError> {
    state.storefront.ensure_session(&id).map_err(domain_error)?;
    let order = state
        .orders
        .submit_order(&id, req.into())
        .await
        .map_err(domain_error)?;
    state
        .storefront
        .refresh_cart_count(&id)
        .await
        .map_err(domain_error)?;

    let response = SubmitOrderResponse {
        order_id: order.id,
        order_number: order.order_number.to_string(),
        formatted_total: state.storefront.formatter().format_price(order.total_amount),
    };
    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_order(
    State(state): State<StorefrontState>,
    Path(id): Path<Uuid>,
) -> ApiResult<OrderResponse> {
    let order = state.orders.get_order(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(OrderResponse::from_order(
        order,
        state.storefront.formatter(),
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}/orders",
    tag = "Orders",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Orders placed in this session, oldest first", body = ApiResponse<Vec<OrderResponse>>),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn list_session_orders(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<OrderResponse>> {
    state.storefront.ensure_session(&id).map_err(domain_error)?;
    let orders = state
        .orders
        .orders_for_session(&id)
        .await
        .map_err(domain_error)?;
    let formatter = state.storefront.formatter();
    Ok(Json(ApiResponse::success(
        orders
            .into_iter()
            .map(|order| OrderResponse::from_order(order, formatter))
            .collect(),
    )))
}
