//! Lenient monetary and quantity parsing
//!
//! Receipt OCR/vision output is inherently noisy ("$3.85", "3.85 USD",
//! "9.875%"). These helpers never fail: amounts degrade to 0.0 and
//! quantities to 1, per the engine's recovery contract.

/// Parse a monetary-ish string by stripping every character that is not
/// a digit, `.`, or `-`. Unparseable input yields 0.0.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Parse a quantity from its leading digit run.
///
/// Embedded units ("2 pcs") keep their leading digits; anything without
/// a leading digit run, and an explicit 0, collapse to 1 so per-unit
/// division is always defined.
pub fn parse_quantity(raw: &str) -> u32 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(n) => n,
    }
}

/// Render an amount as a 2-decimal string for billing display.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_currency_noise() {
        assert_eq!(parse_amount("$3.85"), 3.85);
        assert_eq!(parse_amount("3.85 USD"), 3.85);
        assert_eq!(parse_amount("-2.50"), -2.5);
        assert_eq!(parse_amount("9.875%"), 9.875);
    }

    #[test]
    fn unparseable_amounts_are_zero() {
        assert_eq!(parse_amount("N/A"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("1.2.3"), 0.0);
    }

    #[test]
    fn quantity_uses_leading_digits() {
        assert_eq!(parse_quantity("2"), 2);
        assert_eq!(parse_quantity("2 pcs"), 2);
        assert_eq!(parse_quantity("12x"), 12);
    }

    #[test]
    fn garbled_quantity_collapses_to_one() {
        assert_eq!(parse_quantity("x2"), 1);
        assert_eq!(parse_quantity("N/A"), 1);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("0"), 1);
    }

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_amount(3.8), "3.80");
        assert_eq!(format_amount(1.925), "1.93");
        assert_eq!(format_amount(0.0), "0.00");
    }
}
