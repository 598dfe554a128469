pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use lethe_core::command::ForgottenEngine;

/// Construct the Axum router for the command service.
///
/// A single `POST /command` endpoint carries all three forgotten-files
/// commands; the router holds `Arc<ForgottenEngine>` as shared state.
pub fn router(engine: Arc<ForgottenEngine>) -> Router {
    Router::new()
        .route("/command", post(handlers::command_handler))
        .route("/health", get(handlers::health_handler))
        .layer(DefaultBodyLimit::max(64 * 1024)) // command envelopes are tiny
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(engine)
}
