//! Receipt extraction - the one outbound call.
//!
//! `scan_receipt` is all-or-nothing: on any failure it returns the error and
//! no items at all.

pub mod client;
pub mod fence;
pub mod image;
pub mod prompt;

pub use client::{FakeExtractor, GeminiExtractor, ReceiptExtractor};
pub use fence::strip_code_fence;
pub use image::ReceiptImage;
pub use prompt::RECEIPT_PROMPT;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::ExtractionError;
use crate::normalizer;
use crate::types::Item;

/// Parse model text into normalized items.
///
/// The text must be a JSON array once any code fence is removed. Elements
/// that fail validation are dropped by the normalizer.
pub fn parse_items(text: &str) -> Result<Vec<Item>, ExtractionError> {
    let json = strip_code_fence(text);
    let value: Value =
        serde_json::from_str(json).map_err(|e| ExtractionError::InvalidJson(e.to_string()))?;

    if !value.is_array() {
        return Err(ExtractionError::NotAnArray);
    }
    Ok(normalizer::normalize_value(&value))
}

/// Extract and normalize the items on one receipt
pub fn scan_receipt(
    extractor: &dyn ReceiptExtractor,
    image: &ReceiptImage,
) -> Result<Vec<Item>, ExtractionError> {
    let result = extractor
        .extract_text(image, RECEIPT_PROMPT)
        .and_then(|text| parse_items(&text));

    match &result {
        Ok(items) => info!("Receipt scan produced {} items", items.len()),
        Err(e) => warn!("Receipt scan failed: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_fenced() {
        let items = parse_items("```json\n[{\"name\": \"Tea\", \"price\": 2}]\n```").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Tea");
    }

    #[test]
    fn test_parse_items_not_json() {
        assert!(matches!(
            parse_items("Sorry, I cannot read this receipt."),
            Err(ExtractionError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_items_object() {
        assert_eq!(
            parse_items(r#"{"items": []}"#),
            Err(ExtractionError::NotAnArray)
        );
    }

    #[test]
    fn test_parse_items_empty_array() {
        assert_eq!(parse_items("[]"), Ok(Vec::new()));
    }
}
