//! Money helpers: two-decimal rounding, price parsing and rendering.

/// Round to the nearest cent.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Strict parse used when committing a new item.
/// Returns `None` for empty, non-numeric or non-finite text.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned = text.trim().trim_start_matches('$').replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(round2)
}

/// Lenient parse used while editing an existing item: anything that is not
/// a number becomes `0.0`.
pub fn coerce_price(text: &str) -> f64 {
    parse_price(text).unwrap_or(0.0)
}

/// Render an amount with exactly two decimals (`70` -> `70.00`).
pub fn format_money(value: f64) -> String {
    // avoid printing "-0.00"
    let v = round2(value);
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{:.2}", v)
}
