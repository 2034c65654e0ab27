//! API router.
//!
//! Returns a composable `Router` with every endpoint under `/api/`.
//!
//! Layers (outermost → innermost): CORS → Cache-Control → access log → handler.

use std::sync::Arc;

use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::storage::Storage;

/// Build the API router over `storage`.
pub fn api_router(storage: Arc<dyn Storage>) -> Router {
    build_router(ApiContext::new(storage))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7), and
    // sibling routes must share the param name at the same position.
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/dashboard/stats", get(endpoints::dashboard::stats))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route("/patients/:id", get(endpoints::patients::detail))
        .route(
            "/patients/national-id/:national_id",
            get(endpoints::patients::by_national_id),
        )
        .route(
            "/collectors",
            get(endpoints::collectors::list).post(endpoints::collectors::create),
        )
        .route("/collectors/:id", get(endpoints::collectors::detail))
        .route(
            "/collectors/:id/status",
            patch(endpoints::collectors::update_status),
        )
        .route(
            "/lab-services",
            get(endpoints::lab_services::list).post(endpoints::lab_services::create),
        )
        .route("/lab-services/:id", get(endpoints::lab_services::detail))
        .route(
            "/lab-orders",
            get(endpoints::lab_orders::list).post(endpoints::lab_orders::create),
        )
        .route("/lab-orders/:id", get(endpoints::lab_orders::detail))
        .route(
            "/lab-orders/:id/status",
            patch(endpoints::lab_orders::update_status),
        )
        .route(
            "/lab-orders/:id/assign-collector",
            patch(endpoints::lab_orders::assign_collector),
        )
        .route(
            "/lab-orders/:id/results",
            get(endpoints::lab_orders::results),
        )
        .route("/test-results", post(endpoints::test_results::create))
        .route("/test-results/:id", patch(endpoints::test_results::update))
        .route(
            "/inventory",
            get(endpoints::inventory::list).post(endpoints::inventory::create),
        )
        .route(
            "/inventory/:id/stock",
            patch(endpoints::inventory::adjust_stock),
        )
        .route("/users", put(endpoints::users::upsert))
        .route("/users/:id", get(endpoints::users::detail))
        .fallback(unknown_route)
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::access::log_access))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CorsLayer::permissive())
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound("Route not found".into())
}
