//! Final display formatting for metric values.
//!
//! Formatting is one-way: the formatted string is never re-parsed. Anything
//! that needs the number downstream reads it off the `Metric` instead.

/// Resolve a display symbol for an ISO currency code.
///
/// Unknown codes fall back to a `CODE ` prefix rather than guessing a glyph.
pub fn currency_symbol(code: &str) -> String {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" => String::from("$"),
        "INR" => String::from("₹"),
        "EUR" => String::from("€"),
        "GBP" => String::from("£"),
        "JPY" => String::from("¥"),
        "CAD" => String::from("C$"),
        "AUD" => String::from("A$"),
        other => format!("{other} "),
    }
}

/// Currency amount with symbol prefix and two decimals; `N/A` when absent.
pub fn format_currency(symbol: &str, value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{symbol}{value:.2}"),
        None => String::from("N/A"),
    }
}

/// Market capitalization with symbol prefix and thousands separators,
/// rounded to a whole unit; `N/A` when absent.
pub fn format_market_cap(symbol: &str, value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{symbol}{}", group_thousands(value.round() as i128)),
        None => String::from("N/A"),
    }
}

/// Fraction rendered as a percentage: multiplied by 100, two decimals,
/// trailing percent sign.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Plain ratio/EPS value rounded to two decimals, no symbol.
pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}")
}

fn group_thousands(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    let lead = digits.len() % 3;
    if lead > 0 {
        grouped.push_str(&digits[..lead]);
    }
    for (index, chunk) in digits[lead..].as_bytes().chunks(3).enumerate() {
        if lead > 0 || index > 0 {
            grouped.push(',');
        }
        grouped.push_str(std::str::from_utf8(chunk).expect("ascii digits"));
    }

    grouped
}
