//! Display formatting for amounts.
//!
//! Amounts are rounded to cents only here, never in the running sums.

/// Render an amount as `$12.50`
pub fn format_amount(amount: f64) -> String {
    let rounded = round_cents(amount);
    if rounded < 0.0 {
        format!("-${:.2}", -rounded)
    } else {
        format!("${:.2}", rounded)
    }
}

/// Render a percentage as `15%`, keeping decimals only when present
pub fn format_percentage(percentage: f64) -> String {
    if percentage.fract() == 0.0 {
        format!("{:.0}%", percentage)
    } else {
        format!("{}%", percentage)
    }
}

/// Round half away from zero to two decimals
pub fn round_cents(amount: f64) -> f64 {
    let rounded = (amount * 100.0).round() / 100.0;
    // Avoid printing "-$0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
