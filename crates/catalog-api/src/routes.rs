use axum::{routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::handlers::{health, products, verify};
use crate::state::AppState;

/// Routes served by the catalog application, minus static assets.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        // Code verification form
        .route(
            "/verify-code",
            get(verify::redirect_to_landing).post(verify::verify_code),
        )
        // Product administration
        .route(
            "/api/v1/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/v1/products/count", get(products::count_products))
        .route("/api/v1/products/by-code/{code}", get(products::lookup_product))
        .route(
            "/api/v1/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
