//! Tax line extraction.

use crate::models::config::ExtractionConfig;
use crate::models::receipt::TaxAmount;

use super::amounts::scan_amount_tokens;

/// Extract the tax amount: first line pairing a tax keyword with an amount
/// token wins.
///
/// Both orders are recognized: keyword then amount (an optional colon in
/// between) or amount then keyword. Returns `None` when no line matches, so
/// callers can tell "no tax line found" from "tax line found but
/// unparsable" (the latter never produces a token at all).
pub fn extract_tax(lines: &[&str], config: &ExtractionConfig) -> Option<TaxAmount> {
    for line in lines {
        let lower = line.to_lowercase();

        for keyword in &config.keywords.tax {
            let Some(pos) = lower.find(keyword.as_str()) else {
                continue;
            };

            let end = pos + keyword.len();
            let tokens = scan_amount_tokens(line, config.default_currency);
            let after = tokens
                .iter()
                .find(|t| line.get(end..t.span.0).is_some_and(is_label_gap));
            let before = || tokens.iter().rev().find(|t| t.span.1 <= pos);

            if let Some(token) = after.or_else(before) {
                return Some(TaxAmount {
                    raw: token.raw.clone(),
                    value: token.value,
                    currency: token.currency,
                    line: (*line).to_string(),
                    confidence: config.confidence.tax,
                });
            }
        }
    }

    None
}

// Only an optional colon and whitespace may separate the keyword from its
// amount; anything else means the keyword labels something further away.
fn is_label_gap(gap: &str) -> bool {
    let mut colon_seen = false;
    for c in gap.chars() {
        match c {
            ':' if !colon_seen => colon_seen = true,
            c if c.is_whitespace() => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::Currency;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    #[test]
    fn keyword_then_amount() {
        let tax = extract_tax(&["TAX: Rp 5.000"], &config()).unwrap();
        assert_eq!(tax.value, Decimal::from_str("5000").unwrap());
        assert_eq!(tax.currency, Currency::Idr);
        assert_eq!(tax.confidence, 0.8);
        assert_eq!(tax.line, "TAX: Rp 5.000");
    }

    #[test]
    fn amount_then_keyword() {
        let tax = extract_tax(&["Rp4.500 PPN"], &config()).unwrap();
        assert_eq!(tax.value, Decimal::from_str("4500").unwrap());
    }

    #[test]
    fn localized_keyword_matches() {
        let tax = extract_tax(&["Pajak 2.200"], &config()).unwrap();
        assert_eq!(tax.value, Decimal::from_str("2200").unwrap());
    }

    #[test]
    fn first_matching_line_wins() {
        let lines = vec!["Kopi Rp20.000", "PPN Rp2.000", "Tax Rp9.000"];
        let tax = extract_tax(&lines, &config()).unwrap();
        assert_eq!(tax.value, Decimal::from_str("2000").unwrap());
    }

    #[test]
    fn glued_colon_between_keyword_and_amount() {
        let tax = extract_tax(&["TAX:5.000"], &config()).unwrap();
        assert_eq!(tax.value, Decimal::from_str("5000").unwrap());
    }

    #[test]
    fn distant_amount_after_keyword_is_not_tax() {
        assert!(extract_tax(&["after-tax items listed below Rp5.000"], &config()).is_none());
    }

    #[test]
    fn absent_tax_line_yields_none() {
        assert!(extract_tax(&["Total Rp45.000"], &config()).is_none());
    }

    #[test]
    fn keyword_without_amount_yields_none() {
        assert!(extract_tax(&["tax included"], &config()).is_none());
    }
}
