//! HTTP API for the corporate site: public content, admin CRUD and uploads.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod uploads;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;

use crate::state::AppState;

/// The router with every middleware layer applied.
pub fn app(state: AppState) -> Router {
    let max_body = state.config().max_upload_bytes;

    routes::build_router(state).layer(
        ServiceBuilder::new()
            .layer(middleware::request_tracing::trace_layer())
            .layer(middleware::cors::cors_layer())
            .layer(DefaultBodyLimit::max(max_body)),
    )
}
