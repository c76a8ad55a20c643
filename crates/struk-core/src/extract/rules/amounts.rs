//! Amount token scanning, normalization, and currency detection.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::config::ExtractionConfig;
use crate::models::receipt::{Currency, MonetaryAmount};

use super::patterns::{AMOUNT_CODE, AMOUNT_DOLLAR, AMOUNT_RP};

/// A numeric token found on a single line.
#[derive(Debug, Clone)]
pub struct AmountToken {
    /// Full matched text, including any currency marker.
    pub raw: String,
    /// Normalized numeric value; always positive.
    pub value: Decimal,
    /// Detected currency.
    pub currency: Currency,
    /// Byte range of the match within the line.
    pub span: (usize, usize),
}

/// Scan one line for amount tokens, in order of appearance.
///
/// Currency-marked shapes ($-prefixed, code-suffixed) win over the bare shape
/// on overlapping spans, so a dollar amount is recorded once as USD rather
/// than a second time as a bare number. A bare token must carry an "Rp"
/// prefix or at least one group separator, and a token adjacent to a digit
/// is a truncated slice of a longer numeric run and is skipped.
pub fn scan_amount_tokens(line: &str, default_currency: Currency) -> Vec<AmountToken> {
    let mut tokens: Vec<AmountToken> = Vec::new();

    for caps in AMOUNT_DOLLAR.captures_iter(line) {
        let full = caps.get(0).unwrap();
        push_token(&mut tokens, line, full.start(), full.end(), &caps[1], default_currency);
    }

    for caps in AMOUNT_CODE.captures_iter(line) {
        let full = caps.get(0).unwrap();
        push_token(&mut tokens, line, full.start(), full.end(), &caps[1], default_currency);
    }

    for caps in AMOUNT_RP.captures_iter(line) {
        let has_prefix = caps.get(1).is_some();
        let numeric = &caps[2];
        if !has_prefix && !numeric.contains([',', '.']) {
            continue;
        }
        let full = caps.get(0).unwrap();
        push_token(&mut tokens, line, full.start(), full.end(), numeric, default_currency);
    }

    tokens.sort_by_key(|token| token.span.0);
    tokens
}

fn push_token(
    tokens: &mut Vec<AmountToken>,
    line: &str,
    start: usize,
    end: usize,
    numeric: &str,
    default_currency: Currency,
) {
    if tokens.iter().any(|t| start < t.span.1 && t.span.0 < end) {
        return;
    }
    if in_numeric_run(line, start, end) {
        return;
    }

    let value = parse_amount(numeric);
    if value <= Decimal::ZERO {
        return;
    }

    let raw = &line[start..end];
    tokens.push(AmountToken {
        raw: raw.to_string(),
        value,
        currency: detect_currency(raw, default_currency),
        span: (start, end),
    });
}

// A token touching a digit is a truncated slice of a longer numeric run
// (a date component, a long id) rather than a money amount. Punctuation
// adjacency is fine: keyword-glued amounts like "Total:50.000" are real.
fn in_numeric_run(line: &str, start: usize, end: usize) -> bool {
    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();
    before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
}

/// Normalize a raw amount token to a decimal value.
///
/// Strips currency symbols and whitespace. With both separators present, the
/// one appearing last is the decimal separator. With a single kind, a
/// trailing segment of 1-2 digits reads as a decimal part and anything else
/// as thousands grouping, so "45.000" is forty-five thousand while "45.50"
/// is forty-five and a half. Unparsable input normalizes to zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => {
            cleaned.replace('.', "").replace(',', ".")
        }
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(comma), None) => split_single_separator(&cleaned, comma, ','),
        (None, Some(dot)) => split_single_separator(&cleaned, dot, '.'),
        (None, None) => cleaned,
    };

    Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO)
}

fn split_single_separator(cleaned: &str, last: usize, sep: char) -> String {
    let fraction = &cleaned[last + 1..];
    if (1..=2).contains(&fraction.len()) {
        let integer: String = cleaned[..last].chars().filter(|c| *c != sep).collect();
        format!("{integer}.{fraction}")
    } else {
        cleaned.chars().filter(|c| *c != sep).collect()
    }
}

/// Detect the currency of a raw token from its markers; default when none.
pub fn detect_currency(raw: &str, default: Currency) -> Currency {
    let upper = raw.to_uppercase();
    if upper.contains("RP") || upper.contains("IDR") {
        Currency::Idr
    } else if raw.contains('$') || upper.contains("USD") {
        Currency::Usd
    } else if upper.contains("SGD") {
        Currency::Sgd
    } else if upper.contains("MYR") {
        Currency::Myr
    } else {
        default
    }
}

/// Extract every amount on every line, sorted descending by value.
///
/// The sort is stable: equal values keep their discovery order.
pub fn extract_amounts(lines: &[&str], config: &ExtractionConfig) -> Vec<MonetaryAmount> {
    let mut amounts = Vec::new();

    for (line_index, line) in lines.iter().enumerate() {
        for token in scan_amount_tokens(line, config.default_currency) {
            amounts.push(MonetaryAmount {
                raw: token.raw,
                value: token.value,
                currency: token.currency,
                line_index,
                line: (*line).to_string(),
            });
        }
    }

    amounts.sort_by(|a, b| b.value.cmp(&a.value));
    amounts
}
