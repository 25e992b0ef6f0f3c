//! Session REST API handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{DelegatedEventRequest, SessionResponse};
use crate::application::catalog::{CatalogAction, CatalogView};
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, EmptyData, ValidatedJson,
};
use crate::interfaces::http::render::render_catalog;
use crate::interfaces::http::state::StorefrontState;

#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "Sessions",
    responses(
        (status = 201, description = "Session opened on page 1 of the catalog", body = ApiResponse<SessionResponse>)
    )
)]
pub async fn open_session(
    State(state): State<StorefrontState>,
) -> (StatusCode, Json<ApiResponse<SessionResponse>>) {
    let (session_id, view) = state.storefront.open_session();
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(SessionResponse { session_id, view })),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Current catalog view", body = ApiResponse<CatalogView>),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_view(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
) -> ApiResult<CatalogView> {
    state
        .storefront
        .view(&id)
        .map(|view| Json(ApiResponse::success(view)))
        .map_err(domain_error)
}

#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{id}",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session closed", body = ApiResponse<EmptyData>),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn close_session(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
) -> ApiResult<EmptyData> {
    state
        .storefront
        .close_session(&id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/actions",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    request_body = CatalogAction,
    responses(
        (status = 200, description = "Refreshed view", body = ApiResponse<CatalogView>),
        (status = 400, description = "Malformed JSON body"),
        (status = 404, description = "Unknown session or product"),
        (status = 422, description = "Invalid action")
    )
)]
pub async fn dispatch_action(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
    ValidatedJson(action): ValidatedJson<CatalogAction>,
) -> ApiResult<CatalogView> {
    let view = state
        .storefront
        .dispatch(&id, action)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(view)))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/events",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    request_body = DelegatedEventRequest,
    responses(
        (status = 200, description = "Refreshed view", body = ApiResponse<CatalogView>),
        (status = 400, description = "Malformed JSON body"),
        (status = 404, description = "Unknown session or product"),
        (status = 422, description = "Event target carries no usable data-action")
    )
)]
pub async fn dispatch_event(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
    ValidatedJson(event): ValidatedJson<DelegatedEventRequest>,
) -> ApiResult<CatalogView> {
    let action = CatalogAction::from_dataset(&event.dataset, event.value.as_deref())
        .map_err(domain_error)?;
    let view = state
        .storefront
        .dispatch(&id, action)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(view)))
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}/fragment",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Catalog HTML fragment", body = String, content_type = "text/html"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_fragment(
    State(state): State<StorefrontState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.storefront.view(&id).map_err(domain_error)?;
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        render_catalog(&view),
    ))
}
