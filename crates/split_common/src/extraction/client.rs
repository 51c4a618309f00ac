//! Receipt extractor abstraction
//!
//! One call per scan: image plus fixed prompt in, raw model text out. No
//! retry is attempted. The real client talks to the Gemini
//! `generateContent` REST API; the fake one serves canned answers for tests.

use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

use super::image::ReceiptImage;
use crate::config::ExtractionConfig;
use crate::error::ExtractionError;

/// Anything that can turn a receipt image into model text
pub trait ReceiptExtractor: Send + Sync {
    /// Send the image and instruction, return the model's raw text answer
    fn extract_text(&self, image: &ReceiptImage, prompt: &str) -> Result<String, ExtractionError>;
}

/// Gemini-backed extractor
pub struct GeminiExtractor {
    config: ExtractionConfig,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GeminiExtractor {
    pub fn new(config: ExtractionConfig) -> Result<Self, ExtractionError> {
        if !config.is_usable() {
            return Err(ExtractionError::Disabled);
        }
        let api_key = config
            .api_key
            .as_deref()
            .map(|k| k.trim().to_string())
            .ok_or(ExtractionError::Disabled)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExtractionError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Full `generateContent` URL for the configured model
    pub fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Request body for one image and one instruction
pub fn build_request(image: &ReceiptImage, prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [
                {
                    "inline_data": {
                        "mime_type": image.mime_type,
                        "data": image.data,
                    }
                },
                { "text": prompt },
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
        },
    })
}

/// Concatenated text parts of the first candidate
pub fn response_text(response: &Value) -> Result<String, ExtractionError> {
    let parts = response
        .get("candidates")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("content"))
        .and_then(|v| v.get("parts"))
        .and_then(Value::as_array)
        .ok_or_else(|| ExtractionError::InvalidResponse("no candidate content".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(ExtractionError::InvalidResponse("empty text".to_string()));
    }
    Ok(text)
}

impl ReceiptExtractor for GeminiExtractor {
    fn extract_text(&self, image: &ReceiptImage, prompt: &str) -> Result<String, ExtractionError> {
        info!(
            "Sending {} receipt ({} base64 bytes) to {}",
            image.mime_type,
            image.data.len(),
            self.config.model
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(image, prompt))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractionError::Timeout(self.config.timeout_secs)
                } else {
                    ExtractionError::Http(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .map_err(|e| ExtractionError::InvalidResponse(format!("Failed to parse body: {}", e)))?;

        let text = response_text(&body)?;
        debug!("Extraction returned {} chars", text.len());
        Ok(text)
    }
}

/// Fake extractor for testing
pub struct FakeExtractor {
    responses: Mutex<Vec<Result<String, ExtractionError>>>,
    call_count: Mutex<usize>,
}

impl FakeExtractor {
    /// Answers are served in order; the last one repeats
    pub fn new(responses: Vec<Result<String, ExtractionError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
        }
    }

    pub fn always_text(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn always_error(error: ExtractionError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ReceiptExtractor for FakeExtractor {
    fn extract_text(&self, _image: &ReceiptImage, _prompt: &str) -> Result<String, ExtractionError> {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) += 1;

        let mut responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        match responses.len() {
            0 => Err(ExtractionError::InvalidResponse("empty text".to_string())),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ReceiptImage {
        ReceiptImage::from_bytes(b"jpeg", "image/jpeg").unwrap()
    }

    #[test]
    fn test_gemini_requires_key() {
        let config = ExtractionConfig::default();
        assert!(matches!(
            GeminiExtractor::new(config),
            Err(ExtractionError::Disabled)
        ));
    }

    #[test]
    fn test_gemini_url() {
        let config = ExtractionConfig {
            endpoint: "http://localhost:9000/".to_string(),
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        let extractor = GeminiExtractor::new(config).unwrap();
        assert_eq!(
            extractor.url(),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_build_request_shape() {
        let body = build_request(&image(), "prompt");
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[0]["inline_data"]["data"], "anBlZw==");
        assert_eq!(parts[1]["text"], "prompt");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"text": "[{\"name\": "}, {"text": "\"Tea\"}]"}]}
            }]
        });
        assert_eq!(response_text(&body).unwrap(), "[{\"name\": \"Tea\"}]");
    }

    #[test]
    fn test_response_text_missing_candidates() {
        let body = json!({"promptFeedback": {"blockReason": "OTHER"}});
        assert!(matches!(
            response_text(&body),
            Err(ExtractionError::InvalidResponse(_))
        ));

        let body = json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]});
        assert!(response_text(&body).is_err());
    }

    #[test]
    fn test_fake_sequence() {
        let fake = FakeExtractor::new(vec![
            Ok("[]".to_string()),
            Err(ExtractionError::Status(503)),
        ]);
        assert_eq!(fake.extract_text(&image(), "").unwrap(), "[]");
        assert_eq!(
            fake.extract_text(&image(), ""),
            Err(ExtractionError::Status(503))
        );
        // Last answer repeats
        assert_eq!(
            fake.extract_text(&image(), ""),
            Err(ExtractionError::Status(503))
        );
        assert_eq!(fake.call_count(), 3);
    }
}
