//! Receipt field extraction pipeline.

pub mod rules;

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::{ConfidenceWeights, ExtractionConfig};
use crate::models::receipt::{Currency, ExtractedReceipt};

use rules::{
    extract_amounts, extract_date, extract_items, extract_merchant, extract_tax, extract_time,
    normalize_lines, resolve_total,
};

/// Result of parsing one recognized text, with processing metadata.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The extracted receipt.
    pub receipt: ExtractedReceipt,
    /// Extraction warnings (fields that could not be detected).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for receipt parsing.
pub trait ReceiptParser {
    /// Parse recognized receipt text. Total: never fails.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Heuristic field extractor over recognized receipt text.
///
/// Runs an ordered pipeline of independent extractors: line normalization,
/// then merchant/date/time/amount/item/tax extraction, then total-amount
/// resolution (which depends on the amount pass). Single-threaded,
/// synchronous, and free of shared mutable state.
pub struct ReceiptFieldExtractor {
    config: ExtractionConfig,
}

impl ReceiptFieldExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Replace the whole extraction configuration.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the currency assumed for unmarked tokens.
    pub fn with_default_currency(mut self, currency: Currency) -> Self {
        self.config.default_currency = currency;
        self
    }

    /// Replace the confidence weights.
    pub fn with_confidence(mut self, weights: ConfidenceWeights) -> Self {
        self.config.confidence = weights;
        self
    }

    /// The active extraction configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract structured fields from raw recognized text.
    ///
    /// Total over its input domain: empty or unusable text returns a receipt
    /// with every field at its documented null/zero-confidence default, so
    /// the caller can always render a (possibly empty) editable form.
    pub fn extract(&self, text: &str) -> ExtractedReceipt {
        let lines = normalize_lines(text);
        debug!("extracting fields from {} normalized lines", lines.len());

        let merchant = extract_merchant(&lines, &self.config);
        let date = extract_date(&lines, &self.config.confidence);
        let time = extract_time(&lines, &self.config.confidence);
        let amounts = extract_amounts(&lines, &self.config);
        let items = extract_items(&lines, &self.config);
        let tax = extract_tax(&lines, &self.config);
        // Runs after the amount pass; everything above is independent.
        let total = resolve_total(&amounts, &self.config);

        ExtractedReceipt {
            merchant,
            date,
            time,
            amounts,
            total,
            tax,
            items,
        }
    }
}

impl Default for ReceiptFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for ReceiptFieldExtractor {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        info!("parsing {} characters of recognized text", text.len());

        let receipt = self.extract(text);

        let mut warnings = Vec::new();
        if receipt.date.value.is_none() {
            warnings.push("no transaction date detected".to_string());
        }
        if receipt.amounts.is_empty() {
            warnings.push("no monetary amounts detected".to_string());
        }
        if receipt.total.is_none() {
            warnings.push("no total amount resolved".to_string());
        }
        if receipt.items.is_empty() {
            warnings.push("no line items detected".to_string());
        }

        debug!(
            "extracted {} amounts and {} items",
            receipt.amounts.len(),
            receipt.items.len()
        );

        ExtractionResult {
            receipt,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::{Currency, TotalKind};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const RECEIPT: &str = "STARBUCKS COFFEE\n\
                           Jl. Sudirman No. 1\n\
                           25/12/2023 14:30\n\
                           Cappuccino Rp45.000\n\
                           Total Rp45.000";

    #[test]
    fn extracts_full_receipt_scenario() {
        let receipt = ReceiptFieldExtractor::new().extract(RECEIPT);

        assert_eq!(receipt.merchant.value.as_deref(), Some("STARBUCKS COFFEE"));
        assert_eq!(receipt.merchant.confidence, 0.8);

        let date = receipt.date.value.as_ref().unwrap();
        assert_eq!(date.parsed, NaiveDate::from_ymd_opt(2023, 12, 25));
        assert_eq!(receipt.date.confidence, 0.9);

        assert_eq!(receipt.time.value.as_deref(), Some("14:30"));
        assert_eq!(receipt.time.confidence, 0.8);

        let value = Decimal::from_str("45000").unwrap();
        assert_eq!(receipt.amounts.len(), 2);
        assert!(receipt.amounts.iter().all(|a| a.value == value));
        assert!(receipt.amounts.iter().all(|a| a.currency == Currency::Idr));

        let total = receipt.total.as_ref().unwrap();
        assert_eq!(total.value(), value);
        assert_eq!(total.currency(), Currency::Idr);
        assert_eq!(total.kind, TotalKind::Total);
        assert_eq!(total.confidence, 0.9);

        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].name, "Cappuccino");
        assert_eq!(receipt.items[0].amount, value);
    }

    #[test]
    fn empty_input_yields_documented_defaults() {
        let receipt = ReceiptFieldExtractor::new().extract("");

        assert_eq!(receipt.merchant.value.as_deref(), Some(""));
        assert_eq!(receipt.merchant.confidence, 0.3);
        assert!(receipt.date.value.is_none());
        assert_eq!(receipt.date.confidence, 0.0);
        assert!(receipt.time.value.is_none());
        assert!(receipt.amounts.is_empty());
        assert!(receipt.total.is_none());
        assert!(receipt.tax.is_none());
        assert!(receipt.items.is_empty());
    }

    #[test]
    fn tax_line_is_detected() {
        let receipt = ReceiptFieldExtractor::new().extract("TAX: Rp 5.000");
        let tax = receipt.tax.as_ref().unwrap();
        assert_eq!(tax.value, Decimal::from_str("5000").unwrap());
        assert_eq!(tax.currency, Currency::Idr);
        assert_eq!(tax.confidence, 0.8);
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = ReceiptFieldExtractor::new();
        let first = extractor.extract(RECEIPT);
        let second = extractor.extract(RECEIPT);
        assert_eq!(first, second);
    }

    #[test]
    fn colon_glued_total_resolves_with_keyword() {
        let receipt = ReceiptFieldExtractor::new().extract("Cappuccino Rp45.000\nTotal:50.000");
        let total = receipt.total.as_ref().unwrap();
        assert_eq!(total.value(), Decimal::from_str("50000").unwrap());
        assert_eq!(total.kind, TotalKind::Total);
        assert_eq!(total.confidence, 0.9);
    }

    #[test]
    fn amounts_are_sorted_descending() {
        let text = "A Rp5.000\nB Rp100.000\nC Rp20.000";
        let receipt = ReceiptFieldExtractor::new().extract(text);
        let values: Vec<_> = receipt.amounts.iter().map(|a| a.value).collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(values, sorted);
    }

    #[test]
    fn parse_collects_warnings_for_missing_fields() {
        let result = ReceiptFieldExtractor::new().parse("just some words");
        assert!(result.receipt.amounts.is_empty());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("no monetary amounts")));
        assert!(result.warnings.iter().any(|w| w.contains("no total")));
    }

    #[test]
    fn default_currency_is_configurable() {
        let extractor = ReceiptFieldExtractor::new().with_default_currency(Currency::Usd);
        let receipt = extractor.extract("Burger 12,500.00\nTotal 12,500.00");
        assert!(!receipt.amounts.is_empty());
        assert!(receipt.amounts.iter().all(|a| a.currency == Currency::Usd));
    }
}
