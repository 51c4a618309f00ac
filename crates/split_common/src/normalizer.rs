//! Item Normalizer - receipt lines to atomic items
//!
//! Takes the untrusted lines returned by the extraction service and expands
//! each one into individually assignable units. A line of quantity N becomes
//! N items priced `price / N`, named `"<name> (i/N)"`. The division
//! remainder is not redistributed, so the unit prices may sum to a value a
//! fraction of a cent away from the original line total.
//!
//! Lines without a name or with a non-positive price are dropped silently
//! (these are usually tax or total rows the model let through).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::types::Item;

/// Largest quantity expanded into separate items. Anything above is a
/// misread and the line is kept as a single item.
pub const MAX_UNITS_PER_LINE: usize = 500;

/// One line as guessed by the extraction service.
///
/// Every field is optional because the service gives no schema guarantee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExtractedLine {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl RawExtractedLine {
    pub fn new(name: &str, quantity: Option<f64>, price: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            quantity,
            price: Some(price),
        }
    }

    /// Read a line out of arbitrary JSON. Fields of the wrong type are
    /// treated as absent, never as an error.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            name: obj.get("name").and_then(Value::as_str).map(str::to_string),
            quantity: obj.get("quantity").and_then(Value::as_f64),
            price: obj.get("price").and_then(Value::as_f64),
        }
    }

    fn valid_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    fn valid_price(&self) -> Option<f64> {
        self.price.filter(|price| price.is_finite() && *price > 0.0)
    }

    /// Quantity after defaulting: absent, non-numeric, below one or above
    /// [`MAX_UNITS_PER_LINE`] means 1, so the line stays one item at its full
    /// price.
    ///
    /// Fractional quantities are truncated and the price is later divided by
    /// the truncated count. Dividing by the raw fraction instead would turn
    /// `2.5 x $10` into two $4 items that no longer add up to the line.
    pub fn resolved_quantity(&self) -> usize {
        match self.quantity {
            Some(q) if q.is_finite() && q >= 1.0 && q < (MAX_UNITS_PER_LINE + 1) as f64 => {
                q.trunc() as usize
            }
            _ => 1,
        }
    }
}

/// Expand raw lines into unassigned atomic items
pub fn normalize(lines: &[RawExtractedLine]) -> Vec<Item> {
    lines.iter().flat_map(expand_line).collect()
}

/// Normalize an untrusted JSON document. Anything other than an array
/// yields no items.
pub fn normalize_value(value: &Value) -> Vec<Item> {
    match value.as_array() {
        Some(elements) => elements
            .iter()
            .map(RawExtractedLine::from_value)
            .flat_map(|line| expand_line(&line))
            .collect(),
        None => {
            debug!("Extraction output is not an array, no items");
            Vec::new()
        }
    }
}

fn expand_line(line: &RawExtractedLine) -> Vec<Item> {
    let (Some(name), Some(price)) = (line.valid_name(), line.valid_price()) else {
        debug!("Dropping malformed receipt line: {:?}", line);
        return Vec::new();
    };

    let quantity = line.resolved_quantity();
    if quantity == 1 {
        return vec![Item::new(name, price)];
    }

    let unit_price = price / quantity as f64;
    (1..=quantity)
        .map(|i| Item::new(format!("{} ({}/{})", name, i, quantity), unit_price))
        .collect()
}
