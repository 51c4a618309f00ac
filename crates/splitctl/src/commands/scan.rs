//! Scan command - receipt image to items

use anyhow::Result;
use owo_colors::OwoColorize;
use split_common::extraction::{scan_receipt, GeminiExtractor, ReceiptExtractor, ReceiptImage};
use split_common::{Bill, BillAction, SplitConfig};
use std::io::Write;
use std::path::Path;
use tracing::warn;

use crate::errors::{
    EXIT_EXTRACTION_FAILED, EXIT_NOT_CONFIGURED, EXIT_SUCCESS, EXIT_UNREADABLE_IMAGE,
};
use crate::output;

pub fn run(config: &SplitConfig, path: &Path, json: bool, out: &mut dyn Write) -> Result<i32> {
    let image = match ReceiptImage::from_path(path) {
        Ok(image) => image,
        Err(e) => {
            warn!("Cannot load {}: {}", path.display(), e);
            eprintln!("{} {}", "✗".red(), e.user_message());
            return Ok(EXIT_UNREADABLE_IMAGE);
        }
    };

    let extractor = match GeminiExtractor::new(config.extraction.clone()) {
        Ok(extractor) => extractor,
        Err(e) => {
            warn!("Extraction client unavailable: {}", e);
            eprintln!(
                "{} {} Set GEMINI_API_KEY or [extraction] api_key in the config.",
                "✗".red(),
                e.user_message()
            );
            return Ok(EXIT_NOT_CONFIGURED);
        }
    };

    scan_with(&extractor, &image, json, out)
}

/// Scan one loaded image with any extractor
pub fn scan_with(
    extractor: &dyn ReceiptExtractor,
    image: &ReceiptImage,
    json: bool,
    out: &mut dyn Write,
) -> Result<i32> {
    let items = match scan_receipt(extractor, image) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e.user_message());
            return Ok(EXIT_EXTRACTION_FAILED);
        }
    };

    if json {
        let bill = Bill::new().apply(BillAction::LoadScanned { items })?;
        writeln!(out, "{}", serde_json::to_string_pretty(&bill)?)?;
    } else {
        write!(out, "{}", output::render_items(&items))?;
    }
    Ok(EXIT_SUCCESS)
}
