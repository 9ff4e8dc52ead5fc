//! HTTP interface: an Axum router over the `DealEngine`.

pub mod actor;
pub mod handlers;
pub mod response;

use crate::application::engine::DealEngine;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the deal API router.
pub fn router(engine: Arc<DealEngine>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/deals", post(handlers::create_deal).get(handlers::list_deals))
        .route("/deals/:id", get(handlers::get_deal))
        .route("/deals/:id/accept", post(handlers::accept))
        .route("/deals/:id/reject", post(handlers::reject))
        .route("/deals/:id/counter-offer", post(handlers::counter_offer))
        .route("/deals/:id/cancel", post(handlers::cancel))
        .route("/deals/:id/pay", post(handlers::pay))
        .route("/deals/:id/submit", post(handlers::submit_content))
        .route(
            "/deals/:id/content/:content_id/approve",
            post(handlers::approve_content),
        )
        .route(
            "/deals/:id/content/:content_id/reject",
            post(handlers::reject_content),
        )
        .route("/deals/:id/release-payment", post(handlers::release_payment))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}
