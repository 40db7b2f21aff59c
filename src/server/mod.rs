//! HTTP dashboard
//!
//! Serves the dashboard page with its shareable `farm_name` / `severity`
//! query parameters, plus the image and archive downloads.

pub mod error;
pub mod handlers;
pub mod page;
pub mod routes;
pub mod state;

use std::sync::Arc;

use crate::error::Result;
pub use routes::create_router;
pub use state::AppState;

/// Bind `host:port` and serve until the process stops
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(source = %state.cache.source(), "Listening on http://{}", addr);

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
