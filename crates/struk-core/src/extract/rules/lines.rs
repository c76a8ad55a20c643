//! Line normalization and classification.

use crate::models::receipt::Currency;

use super::amounts::scan_amount_tokens;
use super::patterns::DATE_LIKE;

/// Split raw recognized text into trimmed, non-empty lines, order preserved.
///
/// Total and deterministic: empty input yields an empty sequence.
pub fn normalize_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Whether the line contains a `D/M/Y`-like token.
pub fn is_date_line(line: &str) -> bool {
    DATE_LIKE.is_match(line)
}

/// Whether the line contains a recognized amount token.
pub fn is_amount_line(line: &str, default_currency: Currency) -> bool {
    !scan_amount_tokens(line, default_currency).is_empty()
}
