use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::server::handlers;
use crate::server::state::AppState;

/// Create the dashboard router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Dashboard page
        .route("/", get(handlers::dashboard))

        // Downloads
        .route("/download/image/{row}", get(handlers::download_image))
        .route("/download/all", get(handlers::download_all))

        // Maintenance
        .route("/refresh", post(handlers::refresh))
        .route("/health", get(handlers::health))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
