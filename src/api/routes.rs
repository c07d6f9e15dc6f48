use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;
use crate::middleware::{propagate_request_id, request_span};

/// Creates the router serving the page, the about view and the health check
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home).post(handlers::submit_search))
        .route("/about", get(handlers::about))
        .route("/health", get(handlers::health_check))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(propagate_request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_span)),
        )
        .with_state(state)
}
