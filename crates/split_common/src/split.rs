//! Split Calculator - per-participant shares and proportional tip
//!
//! Items are split evenly among the participants assigned to them. The tip
//! is a bill-wide percentage of the assigned subtotal, handed back to each
//! participant in proportion to their own subtotal. Unassigned items are not
//! part of the subtotal.
//!
//! Sums stay at full `f64` precision. Rounding is a display concern
//! (see [`crate::money`]).

use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::{BillSummary, Item, ItemShare, Participant, ParticipantId, ParticipantTotal};

/// Compute the full bill breakdown.
///
/// Total for every input: no participants gives an empty breakdown, no
/// assigned items gives zeros everywhere.
pub fn calculate(items: &[Item], participants: &[Participant], tip_percentage: f64) -> BillSummary {
    let mut subtotals: HashMap<ParticipantId, f64> =
        participants.iter().map(|p| (p.id, 0.0)).collect();

    for item in items {
        let Some(share) = item.share() else {
            continue;
        };
        for participant_id in &item.assigned_to {
            // Ids without a participant receive nothing
            if let Some(subtotal) = subtotals.get_mut(participant_id) {
                *subtotal += share;
            }
        }
    }

    // Summed in participant order so the result does not depend on map order
    let subtotal: f64 = participants.iter().map(|p| subtotals[&p.id]).sum();
    let tip_amount = subtotal * tip_percentage / 100.0;
    let grand_total = subtotal + tip_amount;

    let mut totals: Vec<ParticipantTotal> = participants
        .iter()
        .map(|p| {
            let own = subtotals[&p.id];
            let tip_share = if subtotal == 0.0 {
                0.0
            } else {
                own / subtotal * tip_amount
            };
            ParticipantTotal {
                participant_id: p.id,
                name: p.name.clone(),
                subtotal: own,
                tip_share,
                total: own + tip_share,
                items: item_shares(items, p.id),
            }
        })
        .collect();

    totals.sort_by(|a, b| compare_names(&a.name, &b.name));

    BillSummary {
        participants: totals,
        subtotal,
        tip_percentage,
        tip_amount,
        grand_total,
    }
}

/// Items claimed by one participant with that participant's share of each
pub fn item_shares(items: &[Item], participant_id: ParticipantId) -> Vec<ItemShare> {
    items
        .iter()
        .filter(|item| item.assigned_to.contains(&participant_id))
        .filter_map(|item| {
            item.share().map(|amount| ItemShare {
                item_id: item.id,
                name: item.name.clone(),
                amount,
                split: item.is_split(),
            })
        })
        .collect()
}

/// Locale-style name ordering: accents and case are ignored, so "álvaro"
/// sorts next to "Alvaro" rather than after "Zoe".
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
