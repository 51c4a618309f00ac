//! API routes for splitd
//!
//! `/v1/scan` is the only route doing I/O. The bill routes are pure
//! computations over the bill sent with each request.

use crate::error::ApiError;
use crate::server::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use split_common::extraction::{scan_receipt, ReceiptImage};
use split_common::{
    Bill, BillAction, BillSummary, Item, Participant, DEFAULT_TIP_PERCENTAGE, VERSION,
};
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Scan Routes
// ============================================================================

pub fn scan_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/scan", post(scan))
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// `data:image/...;base64,...` URL
    #[serde(default, alias = "base64Image")]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResponse {
    pub items: Vec<Item>,
}

async fn scan(
    State(state): State<AppStateArc>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    let extractor = state.extractor.clone().ok_or_else(|| {
        error!("  Scan requested but no extraction client is configured");
        ApiError::NotConfigured
    })?;

    let data_url = req
        .image
        .filter(|image| !image.trim().is_empty())
        .ok_or(ApiError::MissingImage)?;
    let image = ReceiptImage::from_data_url(&data_url).map_err(ApiError::Extraction)?;
    info!("  Scanning {} receipt", image.mime_type);

    // The extraction client blocks on its HTTP call
    let items = tokio::task::spawn_blocking(move || scan_receipt(extractor.as_ref(), &image))
        .await
        .map_err(|e| ApiError::Internal(format!("scan task failed: {}", e)))?
        .map_err(ApiError::Extraction)?;

    Ok(Json(ScanResponse { items }))
}

// ============================================================================
// Bill Routes
// ============================================================================

pub fn split_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/split", post(split))
        .route("/v1/bill/apply", post(apply))
}

fn default_tip_percentage() -> f64 {
    DEFAULT_TIP_PERCENTAGE
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default = "default_tip_percentage")]
    pub tip_percentage: f64,
}

async fn split(Json(req): Json<SplitRequest>) -> Result<Json<BillSummary>, ApiError> {
    let bill = Bill::from_parts(req.items, req.participants, req.tip_percentage)?;
    Ok(Json(bill.summary()))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub bill: Bill,
    pub action: BillAction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub bill: Bill,
    pub summary: BillSummary,
}

async fn apply(Json(req): Json<ApplyRequest>) -> Result<Json<ApplyResponse>, ApiError> {
    req.bill.validate()?;
    let bill = req.bill.apply(req.action)?;
    let summary = bill.summary();
    Ok(Json(ApplyResponse { bill, summary }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub extraction: bool,
    pub uptime_seconds: u64,
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        extraction: state.extractor.is_some(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
