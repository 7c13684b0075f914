//! Route table.

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware, AppState};

/// Build the application router with all middleware applied.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/key", get(handlers::key))
        // Authenticated door API
        .route("/api/open", get(handlers::open))
        .route("/api/close", get(handlers::close))
        .route("/api/status", get(handlers::status))
        // Debug
        .route("/fopen", get(handlers::force_open))
        .route("/fclose", get(handlers::force_close))
        .route("/freset", get(handlers::reset))
        .layer(from_fn_with_state(state.clone(), middleware::refresh_hardware))
        .layer(from_fn(middleware::access_log))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
