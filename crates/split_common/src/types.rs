//! Core bill types shared by the service and the CLI.
//!
//! Items and participants are the only stored entities. Everything under
//! "Derived" is recomputed from scratch by [`crate::split::calculate`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a bill item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Unique identifier of a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One atomic, independently assignable priced entry on a bill.
///
/// `price` is always the cost of this single unit. Multi-quantity receipt
/// lines are expanded by the normalizer before they become items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    /// Participants splitting this item evenly
    #[serde(default)]
    pub assigned_to: BTreeSet<ParticipantId>,
}

impl Item {
    /// Create an unassigned item with a fresh id
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            price,
            assigned_to: BTreeSet::new(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        !self.assigned_to.is_empty()
    }

    pub fn is_split(&self) -> bool {
        self.assigned_to.len() > 1
    }

    /// Cost carried by each assigned participant, `None` when unassigned
    pub fn share(&self) -> Option<f64> {
        if self.assigned_to.is_empty() {
            None
        } else {
            Some(self.price / self.assigned_to.len() as f64)
        }
    }
}

/// One person sharing the bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into(),
        }
    }
}

/// Where the user is in the scan → edit → summary flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Uploading,
    Editing,
    Summary,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Uploading => "uploading",
            Stage::Editing => "editing",
            Stage::Summary => "summary",
        }
    }
}

// ============================================================================
// Derived
// ============================================================================

/// A participant's portion of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemShare {
    pub item_id: ItemId,
    pub name: String,
    pub amount: f64,
    /// True when more than one participant claims the item
    pub split: bool,
}

/// Per-participant breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantTotal {
    pub participant_id: ParticipantId,
    pub name: String,
    pub subtotal: f64,
    pub tip_share: f64,
    pub total: f64,
    pub items: Vec<ItemShare>,
}

/// Bill-wide breakdown produced by the split calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// Sorted by participant name
    pub participants: Vec<ParticipantTotal>,
    pub subtotal: f64,
    pub tip_percentage: f64,
    pub tip_amount: f64,
    pub grand_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_share() {
        let mut item = Item::new("Pizza", 12.0);
        assert_eq!(item.share(), None);
        assert!(!item.is_assigned());

        item.assigned_to.insert(ParticipantId::new());
        item.assigned_to.insert(ParticipantId::new());
        item.assigned_to.insert(ParticipantId::new());
        assert_eq!(item.share(), Some(4.0));
        assert!(item.is_split());
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item::new("Soda", 2.5);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("assignedTo").is_some());
        assert_eq!(json["name"], "Soda");
    }

    #[test]
    fn test_item_missing_assignments_defaults_empty() {
        let id = ItemId::new();
        let json = serde_json::json!({"id": id, "name": "Tea", "price": 1.5});
        let item: Item = serde_json::from_value(json).unwrap();
        assert_eq!(item.id, id);
        assert!(item.assigned_to.is_empty());
    }

    #[test]
    fn test_stage_default() {
        assert_eq!(Stage::default(), Stage::Uploading);
        assert_eq!(Stage::Summary.as_str(), "summary");
    }
}
