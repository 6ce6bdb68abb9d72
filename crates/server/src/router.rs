//! HTTP router construction.
//!
//! Assembles all Axum routes and middleware into a single `Router`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/auth/register", post(api::register))
        .route("/auth/login", post(api::login))
        .route("/auth/logout", post(api::logout))
        .route("/dashboard", get(api::dashboard))
        .route("/api/sos", post(api::send_sos))
        .route("/api/test-connection", get(api::test_connection))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
