//! Fixed instruction sent with every receipt image.

/// Asks for a bare JSON array of `{name, quantity, price}` objects
pub const RECEIPT_PROMPT: &str = r#"Analyze the receipt image. Extract every item, its quantity and its total price.
- Ignore taxes, service charges, tips and total or subtotal lines.
- If no quantity is given, assume 1.
- The price must be a number.
- Return the data as a JSON array of objects. Each object must have the keys: "name" (string), "quantity" (number) and "price" (number).
- If the image is not a receipt or cannot be read, return an empty array.
- Your whole answer must be only the JSON array, with no other text or markdown delimiters.
Example: [{"name": "Burger", "quantity": 1, "price": 12.50}, {"name": "Fries", "quantity": 2, "price": 4.00}]"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_example_is_valid_json() {
        let example = RECEIPT_PROMPT
            .lines()
            .find_map(|line| line.strip_prefix("Example: "))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(example).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}
