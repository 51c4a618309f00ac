//! Terminal rendering for items and summaries

use owo_colors::OwoColorize;
use split_common::money::{format_amount, format_percentage};
use split_common::{Bill, BillSummary, Item};
use std::fmt::Write;

const NAME_WIDTH: usize = 32;
const AMOUNT_WIDTH: usize = 10;

/// Item list as printed after a scan
pub fn render_items(items: &[Item]) -> String {
    let mut out = String::new();

    if items.is_empty() {
        let _ = writeln!(out, "{}", "No items found on the receipt.".yellow());
        return out;
    }

    for item in items {
        let _ = writeln!(
            out,
            "  {:<NAME_WIDTH$}{:>AMOUNT_WIDTH$}",
            item.name,
            format_amount(item.price)
        );
    }
    let total: f64 = items.iter().map(|i| i.price).sum();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {:<NAME_WIDTH$}{:>AMOUNT_WIDTH$}",
        format!("{} items", items.len()).bold(),
        format_amount(total).bold()
    );
    out
}

/// Per-person breakdown followed by bill totals
pub fn render_summary(bill: &Bill, summary: &BillSummary) -> String {
    let mut out = String::new();

    for person in &summary.participants {
        let _ = writeln!(
            out,
            "{:<w$}{:>AMOUNT_WIDTH$}",
            person.name.bold(),
            format_amount(person.total).green().bold(),
            w = NAME_WIDTH + 2
        );
        if person.items.is_empty() {
            let _ = writeln!(out, "  {}", "(no items)".dimmed());
        }
        for share in &person.items {
            let name = if share.split {
                format!("{} (split)", share.name)
            } else {
                share.name.clone()
            };
            let _ = writeln!(
                out,
                "  {:<NAME_WIDTH$}{:>AMOUNT_WIDTH$}",
                name,
                format_amount(share.amount)
            );
        }
        let _ = writeln!(
            out,
            "  {:<NAME_WIDTH$}{:>AMOUNT_WIDTH$}",
            "Subtotal".dimmed(),
            format_amount(person.subtotal)
        );
        let _ = writeln!(
            out,
            "  {:<NAME_WIDTH$}{:>AMOUNT_WIDTH$}",
            "Tip".dimmed(),
            format_amount(person.tip_share)
        );
        let _ = writeln!(out);
    }

    let unassigned = bill.unassigned_items();
    if !unassigned.is_empty() {
        let names: Vec<&str> = unassigned.iter().map(|i| i.name.as_str()).collect();
        let _ = writeln!(
            out,
            "{} {}",
            "Unassigned:".yellow().bold(),
            names.join(", ")
        );
        let _ = writeln!(out);
    }

    let tip_label = format!("Tip ({})", format_percentage(summary.tip_percentage));
    let _ = writeln!(
        out,
        "{:<w$}{:>AMOUNT_WIDTH$}",
        "Subtotal",
        format_amount(summary.subtotal),
        w = NAME_WIDTH + 2
    );
    let _ = writeln!(
        out,
        "{:<w$}{:>AMOUNT_WIDTH$}",
        tip_label,
        format_amount(summary.tip_amount),
        w = NAME_WIDTH + 2
    );
    let _ = writeln!(
        out,
        "{:<w$}{:>AMOUNT_WIDTH$}",
        "Total".bold(),
        format_amount(summary.grand_total).bold(),
        w = NAME_WIDTH + 2
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use split_common::{BillAction, Participant};

    #[test]
    fn test_render_items() {
        let items = vec![Item::new("Burger", 12.5), Item::new("Fries (1/2)", 2.0)];
        let text = render_items(&items);
        assert!(text.contains("Burger"));
        assert!(text.contains("$12.50"));
        assert!(text.contains("$14.50"));
        assert!(text.contains("2 items"));
    }

    #[test]
    fn test_render_items_empty() {
        assert!(render_items(&[]).contains("No items found"));
    }

    #[test]
    fn test_render_summary_lists_unassigned() {
        let bill = Bill::from_parts(
            vec![Item::new("Cake", 6.0)],
            vec![Participant::new("Ana")],
            10.0,
        )
        .unwrap();
        let text = render_summary(&bill, &bill.summary());
        assert!(text.contains("Ana"));
        assert!(text.contains("(no items)"));
        assert!(text.contains("Cake"));
        assert!(text.contains("Tip (10%)"));

        let split = bill.apply(BillAction::QuickSplit).unwrap();
        let text = render_summary(&split, &split.summary());
        assert!(!text.contains("Unassigned"));
        assert!(text.contains("$6.60"));
    }
}
