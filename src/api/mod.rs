//! Read-only REST API over a computed credit report.
//!
//! Provides four GET endpoints:
//! - `/estimate`: fuel, DGE, credit scalars and price-history summary
//! - `/history`: historical price series
//! - `/projection`: projected value band per month
//! - `/revenue`: revenue table with optional month range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::pipeline::CreditReport;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the pipeline run completes and wrapped in
/// `Arc`; no locks needed since all data is read-only.
pub struct AppState {
    /// Report served by every endpoint.
    pub report: CreditReport,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/estimate", get(handlers::get_estimate))
        .route("/history", get(handlers::get_history))
        .route("/projection", get(handlers::get_projection))
        .route("/revenue", get(handlers::get_revenue))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
