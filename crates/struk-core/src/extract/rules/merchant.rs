//! Merchant name extraction from the top of the receipt.

use crate::models::config::ExtractionConfig;
use crate::models::receipt::FieldResult;

use super::lines::{is_amount_line, is_date_line};
use super::patterns::{MERCHANT_CAPS, MERCHANT_MIXED};

/// Extract the merchant name from the first few lines.
///
/// A line matching one of the name shapes that is neither a date line nor an
/// amount line wins. Otherwise the first line is returned verbatim at the
/// fallback confidence, or an empty string when there are no lines at all.
/// Never fails.
pub fn extract_merchant(lines: &[&str], config: &ExtractionConfig) -> FieldResult<String> {
    let scan = lines.len().min(config.merchant_scan_lines);

    for line in &lines[..scan] {
        let shaped = MERCHANT_CAPS.is_match(line) || MERCHANT_MIXED.is_match(line);
        if shaped && !is_date_line(line) && !is_amount_line(line, config.default_currency) {
            return FieldResult::new(
                (*line).to_string(),
                config.confidence.merchant_match,
                *line,
            );
        }
    }

    let fallback = lines.first().map(|l| (*l).to_string()).unwrap_or_default();
    FieldResult {
        value: Some(fallback.clone()),
        confidence: config.confidence.merchant_fallback,
        evidence_line: fallback,
    }
}
