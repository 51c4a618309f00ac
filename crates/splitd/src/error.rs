//! HTTP error mapping for splitd.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use split_common::{BillError, ExtractionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing image in request body")]
    MissingImage,

    #[error("Extraction client not configured. Check the API key.")]
    NotConfigured,

    #[error("{0}")]
    Extraction(ExtractionError),

    #[error("{0}")]
    Bill(#[from] BillError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::Bill(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(ExtractionError::InvalidImage(_)) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(ExtractionError::Disabled) | ApiError::NotConfigured => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Extraction(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the caller. Extraction failures collapse to one
    /// user-facing message; details stay in the logs.
    fn message(&self) -> String {
        match self {
            ApiError::Extraction(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
