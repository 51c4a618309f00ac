//! Bill state and its transitions.
//!
//! A [`Bill`] is a plain serializable value. Every edit goes through
//! [`Bill::apply`], which returns a new bill and leaves the old one
//! untouched, so callers can keep or drop revisions freely.
//!
//! Invariant kept by every transition: each id in an item's `assigned_to`
//! belongs to a participant of the same bill.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::error::BillError;
use crate::split;
use crate::types::{BillSummary, Item, ItemId, Participant, ParticipantId, Stage};

/// Tip applied to a fresh bill
pub const DEFAULT_TIP_PERCENTAGE: f64 = 10.0;

/// Name given to manually added items
pub const NEW_ITEM_NAME: &str = "New item";

fn default_tip_percentage() -> f64 {
    DEFAULT_TIP_PERCENTAGE
}

/// The whole editable state of one bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default)]
    pub stage: Stage,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default = "default_tip_percentage")]
    pub tip_percentage: f64,
}

impl Default for Bill {
    fn default() -> Self {
        Self {
            stage: Stage::Uploading,
            items: Vec::new(),
            participants: Vec::new(),
            tip_percentage: DEFAULT_TIP_PERCENTAGE,
        }
    }
}

/// Edits a user can make to a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BillAction {
    /// Scan finished: replace the items and start editing
    LoadScanned { items: Vec<Item> },
    /// Skip scanning and start editing an empty item list
    EnterManually,
    AddItem,
    RenameItem { item: ItemId, name: String },
    SetItemPrice { item: ItemId, price: f64 },
    RemoveItem { item: ItemId },
    AddParticipant { name: String },
    /// Removes the participant and every assignment to them
    RemoveParticipant { participant: ParticipantId },
    Assign { item: ItemId, participant: ParticipantId },
    Unassign { item: ItemId, participant: ParticipantId },
    /// Assign every item to every participant, replacing current assignments
    QuickSplit,
    SetTip { percentage: f64 },
    Finalize,
    BackToEditor,
    StartOver,
}

impl Bill {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an editable bill from externally supplied parts, rejecting
    /// dangling assignments and invalid amounts.
    pub fn from_parts(
        items: Vec<Item>,
        participants: Vec<Participant>,
        tip_percentage: f64,
    ) -> Result<Self, BillError> {
        let bill = Self {
            stage: Stage::Editing,
            items,
            participants,
            tip_percentage,
        };
        bill.validate()?;
        Ok(bill)
    }

    /// Check the invariants a bill from outside may have broken
    pub fn validate(&self) -> Result<(), BillError> {
        validate_tip(self.tip_percentage)?;

        let mut participant_ids = HashSet::new();
        for participant in &self.participants {
            if !participant_ids.insert(participant.id) {
                return Err(BillError::DuplicateParticipant(participant.id));
            }
        }

        let mut item_ids = HashSet::new();
        for item in &self.items {
            if !item_ids.insert(item.id) {
                return Err(BillError::DuplicateItem(item.id));
            }
            validate_price(item.price)?;
            for participant_id in &item.assigned_to {
                self.require_participant(*participant_id)?;
            }
        }
        Ok(())
    }

    /// Apply one edit, returning the new bill
    pub fn apply(&self, action: BillAction) -> Result<Bill, BillError> {
        let mut next = self.clone();
        debug!("Applying {:?} in stage {}", action, self.stage.as_str());

        match action {
            BillAction::LoadScanned { items } => {
                next.require_stage(Stage::Uploading)?;
                next.items = items;
                next.stage = Stage::Editing;
            }
            BillAction::EnterManually => {
                next.require_stage(Stage::Uploading)?;
                next.stage = Stage::Editing;
            }
            BillAction::AddItem => {
                next.require_stage(Stage::Editing)?;
                next.items.push(Item::new(NEW_ITEM_NAME, 0.0));
            }
            BillAction::RenameItem { item, name } => {
                next.require_stage(Stage::Editing)?;
                next.item_mut(item)?.name = name;
            }
            BillAction::SetItemPrice { item, price } => {
                next.require_stage(Stage::Editing)?;
                validate_price(price)?;
                next.item_mut(item)?.price = price;
            }
            BillAction::RemoveItem { item } => {
                next.require_stage(Stage::Editing)?;
                next.item_mut(item)?;
                next.items.retain(|i| i.id != item);
            }
            BillAction::AddParticipant { name } => {
                next.require_stage(Stage::Editing)?;
                let name = name.trim();
                if name.is_empty() {
                    return Err(BillError::EmptyName);
                }
                next.participants.push(Participant::new(name));
            }
            BillAction::RemoveParticipant { participant } => {
                next.require_stage(Stage::Editing)?;
                next.require_participant(participant)?;
                next.participants.retain(|p| p.id != participant);
                for item in &mut next.items {
                    item.assigned_to.remove(&participant);
                }
            }
            BillAction::Assign { item, participant } => {
                next.require_stage(Stage::Editing)?;
                next.require_participant(participant)?;
                next.item_mut(item)?.assigned_to.insert(participant);
            }
            BillAction::Unassign { item, participant } => {
                next.require_stage(Stage::Editing)?;
                next.require_participant(participant)?;
                next.item_mut(item)?.assigned_to.remove(&participant);
            }
            BillAction::QuickSplit => {
                next.require_stage(Stage::Editing)?;
                if next.participants.is_empty() {
                    return Err(BillError::NoParticipants);
                }
                let everyone: Vec<ParticipantId> =
                    next.participants.iter().map(|p| p.id).collect();
                for item in &mut next.items {
                    item.assigned_to = everyone.iter().copied().collect();
                }
            }
            BillAction::SetTip { percentage } => {
                validate_tip(percentage)?;
                next.tip_percentage = percentage;
            }
            BillAction::Finalize => {
                next.require_stage(Stage::Editing)?;
                if next.participants.is_empty() {
                    return Err(BillError::NoParticipants);
                }
                next.stage = Stage::Summary;
            }
            BillAction::BackToEditor => {
                next.require_stage(Stage::Summary)?;
                next.stage = Stage::Editing;
            }
            BillAction::StartOver => {
                next = Bill::default();
            }
        }

        Ok(next)
    }

    /// Items nobody has claimed yet
    pub fn unassigned_items(&self) -> Vec<&Item> {
        self.items.iter().filter(|i| !i.is_assigned()).collect()
    }

    /// Items claimed by one participant
    pub fn items_for(&self, participant: ParticipantId) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| i.assigned_to.contains(&participant))
            .collect()
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn can_finalize(&self) -> bool {
        self.stage == Stage::Editing && !self.participants.is_empty()
    }

    /// Current breakdown, recomputed from scratch
    pub fn summary(&self) -> BillSummary {
        split::calculate(&self.items, &self.participants, self.tip_percentage)
    }

    fn require_stage(&self, stage: Stage) -> Result<(), BillError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(BillError::WrongStage(self.stage.as_str()))
        }
    }

    fn require_participant(&self, id: ParticipantId) -> Result<(), BillError> {
        self.participant(id)
            .map(|_| ())
            .ok_or(BillError::UnknownParticipant(id))
    }

    fn item_mut(&mut self, id: ItemId) -> Result<&mut Item, BillError> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(BillError::UnknownItem(id))
    }
}

fn validate_price(price: f64) -> Result<(), BillError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(BillError::InvalidPrice(price))
    }
}

fn validate_tip(percentage: f64) -> Result<(), BillError> {
    if percentage.is_finite() && percentage >= 0.0 {
        Ok(())
    } else {
        Err(BillError::InvalidTip(percentage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing() -> Bill {
        Bill::new().apply(BillAction::EnterManually).unwrap()
    }

    #[test]
    fn test_default_bill() {
        let bill = Bill::new();
        assert_eq!(bill.stage, Stage::Uploading);
        assert_eq!(bill.tip_percentage, 10.0);
        assert!(bill.items.is_empty());
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let bill = editing();
        let next = bill.apply(BillAction::AddItem).unwrap();
        assert!(bill.items.is_empty());
        assert_eq!(next.items.len(), 1);
        assert_eq!(next.items[0].name, NEW_ITEM_NAME);
        assert_eq!(next.items[0].price, 0.0);
    }

    #[test]
    fn test_edits_need_editing_stage() {
        let bill = Bill::new();
        assert_eq!(
            bill.apply(BillAction::AddItem),
            Err(BillError::WrongStage("uploading"))
        );
    }

    #[test]
    fn test_action_json_shape() {
        let action: BillAction =
            serde_json::from_str(r#"{"action": "set_tip", "percentage": 15}"#).unwrap();
        assert_eq!(action, BillAction::SetTip { percentage: 15.0 });
    }

    #[test]
    fn test_validate_rejects_repeated_participant() {
        let ana = Participant::new("Ana");
        let twin = Participant {
            id: ana.id,
            name: "Bea".to_string(),
        };
        let mut item = Item::new("Soup", 10.0);
        item.assigned_to.insert(ana.id);

        let result = Bill::from_parts(vec![item], vec![ana.clone(), twin], 10.0);
        assert_eq!(result, Err(BillError::DuplicateParticipant(ana.id)));
    }

    #[test]
    fn test_from_parts_rejects_dangling_assignment() {
        let stranger = ParticipantId::new();
        let mut item = Item::new("Cake", 6.0);
        item.assigned_to.insert(stranger);
        let result = Bill::from_parts(vec![item], vec![Participant::new("Ana")], 10.0);
        assert_eq!(result, Err(BillError::UnknownParticipant(stranger)));
    }
}
