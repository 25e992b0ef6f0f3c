//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, EmptyData};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::{cart, health, orders, products, sessions};
use super::state::StorefrontState;
use crate::application::catalog::{
    CatalogAction, CatalogView, GridView, PageButton, PaginationView, ProductCard,
};
use crate::application::services::{OrderService, StorefrontService};

/// Everything the routes need; each handler extracts its own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<StorefrontService>,
    pub orders: Arc<OrderService>,
    pub metrics: PrometheusHandle,
    pub started_at: Arc<Instant>,
}

impl FromRef<AppState> for StorefrontState {
    fn from_ref(s: &AppState) -> Self {
        StorefrontState {
            storefront: Arc::clone(&s.storefront),
            orders: Arc::clone(&s.orders),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            storefront: Arc::clone(&s.storefront),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        MetricsState {
            handle: s.metrics.clone(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Sessions
        sessions::open_session,
        sessions::get_view,
        sessions::close_session,
        sessions::dispatch_action,
        sessions::dispatch_event,
        sessions::get_fragment,
        // Cart
        cart::get_cart,
        cart::add_item,
        cart::set_item_quantity,
        cart::remove_item,
        // Orders
        orders::submit_order,
        orders::get_order,
        orders::list_session_orders,
        // Products
        products::get_product,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            CatalogAction,
            CatalogView,
            GridView,
            ProductCard,
            PaginationView,
            PageButton,
            sessions::dto::SessionResponse,
            sessions::dto::DelegatedEventRequest,
            cart::AddToCartRequest,
            cart::SetQuantityRequest,
            cart::CartResponse,
            cart::CartLineResponse,
            orders::SubmitOrderRequest,
            orders::SubmitOrderResponse,
            orders::OrderResponse,
            orders::CustomerDto,
            products::ProductResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Sessions", description = "Browsing sessions: catalog view, search, pagination, delegated UI events"),
        (name = "Cart", description = "Per-session shopping cart"),
        (name = "Orders", description = "Checkout and order lookup"),
        (name = "Products", description = "Product details"),
    ),
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "Catalog browsing, cart and checkout for the storefront",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub fn create_api_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/", post(sessions::open_session))
        .route(
            "/{id}",
            get(sessions::get_view).delete(sessions::close_session),
        )
        .route("/{id}/actions", post(sessions::dispatch_action))
        .route("/{id}/events", post(sessions::dispatch_event))
        .route("/{id}/fragment", get(sessions::get_fragment))
        .route("/{id}/cart", get(cart::get_cart))
        .route("/{id}/cart/items", post(cart::add_item))
        .route(
            "/{id}/cart/items/{product_id}",
            put(cart::set_item_quantity).delete(cart::remove_item),
        )
        .route(
            "/{id}/orders",
            get(orders::list_session_orders).post(orders::submit_order),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics))
        .nest("/api/v1/sessions", session_routes)
        .route("/api/v1/orders/{id}", get(orders::get_order))
        .route("/api/v1/products/{id}", get(products::get_product))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::domain::Product;
    use crate::server::Services;

    fn app() -> Router {
        let catalog = vec![
            Product::new("a", "Phone", Decimal::from(5000))
                .with_specs("4G")
                .with_image("img/phone.jpg"),
            Product::new("b", "Tablet", Decimal::from(9000)),
            Product::new("c", "Phone Case", Decimal::from(1500)),
        ];
        let services = Services::build(catalog, &AppConfig::default());
        create_api_router(AppState {
            storefront: services.storefront,
            orders: services.orders,
            metrics: PrometheusBuilder::new().build_recorder().handle(),
            started_at: Arc::new(Instant::now()),
        })
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn open(app: &Router) -> String {
        let (status, body) = call(app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_reports_catalog_and_sessions() {
        let app = app();
        open(&app).await;
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["catalog_size"], 3);
        assert_eq!(body["active_sessions"], 1);
    }

    #[tokio::test]
    async fn opened_session_shows_first_page() {
        let app = app();
        let (_, body) = call(&app, Method::POST, "/api/v1/sessions", None).await;
        let view = &body["data"]["view"];
        assert_eq!(view["grid"]["state"], "cards");
        assert_eq!(view["grid"]["cards"].as_array().unwrap().len(), 3);
        assert_eq!(view["pagination"]["total_pages"], 1);
        assert_eq!(view["cart_count"], 0);
    }

    #[tokio::test]
    async fn search_action_filters_the_grid() {
        let app = app();
        let id = open(&app).await;
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/actions"),
            Some(json!({"action": "search", "term": "PHONE"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let cards = body["data"]["grid"]["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["detail_href"], "product.html?id=a");
    }

    #[tokio::test]
    async fn delegated_event_adds_to_cart_and_updates_badge() {
        let app = app();
        let id = open(&app).await;
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/events"),
            Some(json!({"dataset": {"action": "add-to-cart", "id": "b"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["cart_count"], 1);

        let (_, cart) = call(&app, Method::GET, &format!("/api/v1/sessions/{id}/cart"), None).await;
        assert_eq!(cart["data"]["item_count"], 1);
        assert_eq!(cart["data"]["formatted_total"], "₦9,000");
    }

    #[tokio::test]
    async fn event_without_action_is_rejected() {
        let app = app();
        let id = open(&app).await;
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/events"),
            Some(json!({"dataset": {"id": "b"}})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn over_range_quantity_is_rejected_on_every_route() {
        let app = app();
        let id = open(&app).await;
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/actions"),
            Some(json!({"action": "add_to_cart", "product_id": "a", "quantity": 5000})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("quantity"));

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/events"),
            Some(json!({"dataset": {"action": "add-to-cart", "id": "a", "quantity": "4294967295"}})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, body) = call(&app, Method::GET, &format!("/api/v1/sessions/{id}/cart"), None).await;
        assert_eq!(body["data"]["item_count"], 0);
    }

    #[tokio::test]
    async fn malformed_action_body_gets_the_envelope() {
        let app = app();
        let id = open(&app).await;
        for route in ["actions", "events"] {
            let request = Request::builder()
                .method(Method::POST)
                .uri(format!("/api/v1/sessions/{id}/{route}"))
                .header("content-type", "application/json")
                .body(Body::from("{\"action\": "))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["success"], false);
            assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
        }
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/api/v1/sessions/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn fragment_is_html() {
        let app = app();
        let id = open(&app).await;
        let request = Request::builder()
            .uri(format!("/api/v1/sessions/{id}/fragment"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"id="productsGrid""#));
        assert!(html.contains("product.html?id=a"));
        assert!(html.contains(r#"src="img/phone.jpg""#));
    }

    #[tokio::test]
    async fn cart_item_lifecycle() {
        let app = app();
        let id = open(&app).await;
        let items = format!("/api/v1/sessions/{id}/cart/items");

        let (status, _) = call(&app, Method::POST, &items, Some(json!({"product_id": "a", "quantity": 0}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(&app, Method::POST, &items, Some(json!({"product_id": "zzz"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(&app, Method::POST, &items, Some(json!({"product_id": "a", "quantity": 2}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["item_count"], 2);

        let (_, body) = call(&app, Method::PUT, &format!("{items}/a"), Some(json!({"quantity": 5}))).await;
        assert_eq!(body["data"]["item_count"], 5);
        assert_eq!(body["data"]["formatted_total"], "₦25,000");

        let (_, body) = call(&app, Method::DELETE, &format!("{items}/a"), None).await;
        assert_eq!(body["data"]["item_count"], 0);

        let (_, view) = call(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(view["data"]["cart_count"], 0);
    }

    #[tokio::test]
    async fn checkout_places_order_and_empties_cart() {
        let app = app();
        let id = open(&app).await;
        let checkout = json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "08012345678",
            "address": "1 Marina, Lagos",
            "fulfillment_method": "delivery",
            "payment_method": "transfer"
        });

        let (status, _) = call(&app, Method::POST, &format!("/api/v1/sessions/{id}/orders"), Some(checkout.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        call(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/cart/items"),
            Some(json!({"product_id": "c", "quantity": 2})),
        )
        .await;

        let (status, body) = call(&app, Method::POST, &format!("/api/v1/sessions/{id}/orders"), Some(checkout)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["data"]["order_number"].as_str().unwrap().starts_with("COJJ-"));
        assert_eq!(body["data"]["formatted_total"], "₦3,000");

        let order_id = body["data"]["order_id"].as_str().unwrap().to_string();
        let (status, order) = call(&app, Method::GET, &format!("/api/v1/orders/{order_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(order["data"]["status"], "pending");
        assert_eq!(order["data"]["items"][0]["quantity"], 2);

        let (_, view) = call(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(view["data"]["cart_count"], 0);

        let (_, listed) = call(&app, Method::GET, &format!("/api/v1/sessions/{id}/orders"), None).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
        assert_eq!(listed["data"][0]["id"], order_id.as_str());
    }

    #[tokio::test]
    async fn invalid_checkout_is_422() {
        let app = app();
        let id = open(&app).await;
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/orders"),
            Some(json!({
                "name": "",
                "email": "nope",
                "phone": "0801234567",
                "address": "x",
                "fulfillment_method": "pickup",
                "payment_method": "card"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("email"));
        assert!(error.contains("name"));
    }

    #[tokio::test]
    async fn product_detail_and_missing_product() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/api/v1/products/a", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["formatted_price"], "₦5,000");

        let (status, _) = call(&app, Method::GET, "/api/v1/products/zzz", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn closed_session_is_gone() {
        let app = app();
        let id = open(&app).await;
        let uri = format!("/api/v1/sessions/{id}");
        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn openapi_lists_session_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/sessions/{id}/actions"));
        assert!(doc.paths.paths.contains_key("/api/v1/sessions/{id}/events"));
    }
}
