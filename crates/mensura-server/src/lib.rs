// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! HTTP hosting layer for the mensura formula validation service.
//!
//! A thin axum router over [`mensura_validate::Validator`]. The core
//! holds no per-request mutable state, so one shared validator serves
//! all connections.

pub mod config;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use state::AppState;
use tower_http::trace::TraceLayer;

/// Build the service router.
///
/// Validation failures travel inside the response envelope with status
/// 200; only malformed request bodies are rejected at the HTTP level by
/// the JSON extractor.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/validate", post(handlers::validate_handler))
        .route("/api/functions", get(handlers::functions_handler))
        .route("/api/units", get(handlers::units_handler))
        .route("/api/constants", get(handlers::constants_handler))
        .route("/healthz", get(handlers::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
