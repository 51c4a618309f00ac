//! Receipt images as sent to the extraction service.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ExtractionError;

/// A base64-encoded image with its MIME type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptImage {
    pub mime_type: String,
    /// Standard base64, no data URL prefix
    pub data: String,
}

impl ReceiptImage {
    /// Parse a `data:image/...;base64,...` URL as produced by a browser
    /// file reader.
    pub fn from_data_url(url: &str) -> Result<Self, ExtractionError> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| ExtractionError::InvalidImage("not a data URL".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ExtractionError::InvalidImage("data URL has no payload".to_string()))?;

        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| ExtractionError::InvalidImage("data URL is not base64".to_string()))?;

        if payload.is_empty() {
            return Err(ExtractionError::InvalidImage("empty image".to_string()));
        }
        STANDARD
            .decode(payload)
            .map_err(|e| ExtractionError::InvalidImage(format!("bad base64: {}", e)))?;

        Self::checked(mime_type, payload.to_string())
    }

    /// Encode raw image bytes
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::InvalidImage("empty image".to_string()));
        }
        Self::checked(mime_type, STANDARD.encode(bytes))
    }

    /// Read an image file, guessing the MIME type from its extension
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let bytes = std::fs::read(path)
            .map_err(|e| ExtractionError::InvalidImage(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes, mime.essence_str())
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    fn checked(mime_type: &str, data: String) -> Result<Self, ExtractionError> {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(ExtractionError::InvalidImage(format!(
                "unsupported type {}",
                mime_type
            )));
        }
        Ok(Self { mime_type, data })
    }
}
