//! Bill documents read from files or stdin.
//!
//! A document is `{"items": [...], "participants": [...], "tipPercentage": n}`
//! as printed by `splitctl scan --json`. The stage field is ignored; every
//! loaded document is editable.

use anyhow::{Context, Result};
use split_common::Bill;
use std::fs;
use std::io::Read;

/// Read a bill from a path, or from stdin when the source is `-`
pub fn read_bill(source: &str) -> Result<Bill> {
    let text = if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read bill from stdin")?;
        text
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))?
    };
    parse_bill(&text).with_context(|| format!("Invalid bill document {}", source))
}

/// Parse and validate one bill document
pub fn parse_bill(text: &str) -> Result<Bill> {
    let document: Bill = serde_json::from_str(text)?;
    let bill = Bill::from_parts(
        document.items,
        document.participants,
        document.tip_percentage,
    )?;
    Ok(bill)
}
