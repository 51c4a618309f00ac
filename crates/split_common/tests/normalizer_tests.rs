//! Tests for receipt line normalization.

use serde_json::json;
use split_common::normalizer::{normalize, normalize_value, RawExtractedLine, MAX_UNITS_PER_LINE};

#[test]
fn test_absent_or_non_positive_quantity_yields_one_item() {
    for quantity in [None, Some(0.0), Some(-1.0), Some(1.0)] {
        let items = normalize(&[RawExtractedLine::new("Burger", quantity, 12.5)]);
        assert_eq!(items.len(), 1, "quantity {:?}", quantity);
        assert_eq!(items[0].name, "Burger");
        assert_eq!(items[0].price, 12.5);
        assert!(items[0].assigned_to.is_empty());
    }
}

#[test]
fn test_quantity_expands_with_ordinal_names() {
    for n in 2..=6usize {
        let items = normalize(&[RawExtractedLine::new("Beer", Some(n as f64), 21.0)]);
        assert_eq!(items.len(), n);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.name, format!("Beer ({}/{})", i + 1, n));
            assert_eq!(item.price, 21.0 / n as f64);
        }
    }
}

#[test]
fn test_invalid_lines_yield_nothing() {
    let lines = vec![
        RawExtractedLine::new("Tax", None, 0.0),
        RawExtractedLine::new("Discount", None, -2.0),
        RawExtractedLine::new("", None, 3.0),
        RawExtractedLine {
            name: None,
            quantity: Some(2.0),
            price: Some(3.0),
        },
        RawExtractedLine {
            name: Some("Water".to_string()),
            quantity: None,
            price: None,
        },
    ];
    assert!(normalize(&lines).is_empty());
}

#[test]
fn test_bad_lines_do_not_affect_good_ones() {
    let value = json!([
        {"name": "Pasta", "quantity": 1, "price": 11.0},
        {"name": "TOTAL", "price": "27.00"},
        {"quantity": 3, "price": 9.0},
        "garbage",
        {"name": "Wine", "quantity": "2", "price": 16.0}
    ]);
    let items = normalize_value(&value);
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    // Non-numeric quantity falls back to 1
    assert_eq!(names, vec!["Pasta", "Wine"]);
}

#[test]
fn test_non_array_input_yields_empty() {
    for value in [
        json!({"name": "Burger", "price": 12.5}),
        json!("Burger"),
        json!(null),
        json!(42),
    ] {
        assert!(normalize_value(&value).is_empty());
    }
}

#[test]
fn test_receipt_example() {
    let value = json!([
        {"name": "Burger", "quantity": 1, "price": 12.50},
        {"name": "Fries", "quantity": 2, "price": 4.00}
    ]);
    let items = normalize_value(&value);
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].name, "Burger");
    assert_eq!(items[0].price, 12.5);
    assert_eq!(items[1].name, "Fries (1/2)");
    assert_eq!(items[1].price, 2.0);
    assert_eq!(items[2].name, "Fries (2/2)");
    assert_eq!(items[2].price, 2.0);
}

#[test]
fn test_remainder_is_not_redistributed() {
    let items = normalize(&[RawExtractedLine::new("Dumplings", Some(3.0), 10.0)]);
    // Every unit carries the same even share, including the last one
    assert!(items.iter().all(|i| i.price == 10.0 / 3.0));
    let sum: f64 = items.iter().map(|i| i.price).sum();
    assert!((sum - 10.0).abs() < 1e-9);
}

#[test]
fn test_implausible_quantity_stays_one_item() {
    let items = normalize_value(&json!([
        {"name": "Napkin", "quantity": 1e12, "price": 1.0}
    ]));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Napkin");
    assert_eq!(items[0].price, 1.0);
}

#[test]
fn test_quantity_bound_is_inclusive() {
    let at_bound = RawExtractedLine::new("Straw", Some(MAX_UNITS_PER_LINE as f64), 50.0);
    assert_eq!(at_bound.resolved_quantity(), MAX_UNITS_PER_LINE);
    assert_eq!(normalize(&[at_bound]).len(), MAX_UNITS_PER_LINE);

    let above = RawExtractedLine::new("Straw", Some(MAX_UNITS_PER_LINE as f64 + 1.0), 50.0);
    assert_eq!(above.resolved_quantity(), 1);
}
