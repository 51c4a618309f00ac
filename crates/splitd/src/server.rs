//! HTTP server for splitd

use crate::routes;
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use split_common::extraction::ReceiptExtractor;
use split_common::SplitConfig;
use std::sync::Arc;
use std::time::Instant;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers. Read-only: every request
/// works on its own bill value.
pub struct AppState {
    pub config: SplitConfig,
    /// `None` when no API key is configured; scans are then refused
    pub extractor: Option<Arc<dyn ReceiptExtractor>>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: SplitConfig, extractor: Option<Arc<dyn ReceiptExtractor>>) -> Self {
        Self {
            config,
            extractor,
            start_time: Instant::now(),
        }
    }
}

/// Build the full router
pub fn app(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let state = Arc::new(state);

    Router::new()
        .merge(routes::scan_routes())
        .merge(routes::split_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl+C
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.server.bind.clone();
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C");
}
