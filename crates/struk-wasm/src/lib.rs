//! WASM bindings for receipt text interpretation.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Recognition runs on the JavaScript side; these bindings take the recognized
//! text and return structured receipt data.

use wasm_bindgen::prelude::*;

use struk_core::extract::rules::{detect_currency, parse_amount};
use struk_core::{
    Currency, ExpenseRecord, ExtractedReceipt, ExtractionConfig, ReceiptFieldExtractor,
    ReceiptParser,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract receipt fields from recognized text.
#[wasm_bindgen]
pub fn extract_receipt_from_text(text: &str) -> Result<JsValue, JsValue> {
    let receipt = ReceiptFieldExtractor::new().extract(text);
    serde_wasm_bindgen::to_value(&receipt).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a formatted amount token (e.g. "Rp45.000" or "12,500.00").
#[wasm_bindgen]
pub fn parse_amount_token(raw: &str) -> f64 {
    parse_amount(raw).to_string().parse().unwrap_or(0.0)
}

/// Detect the currency code of an amount token, defaulting to IDR.
#[wasm_bindgen]
pub fn detect_currency_code(raw: &str) -> String {
    detect_currency(raw, Currency::Idr).code().to_string()
}

/// Receipt extractor class for browser use.
#[wasm_bindgen]
pub struct ReceiptExtractor {
    config: ExtractionConfig,
}

#[wasm_bindgen]
impl ReceiptExtractor {
    /// Create a new receipt extractor with default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Set the currency assumed for unmarked amounts (e.g. "USD").
    #[wasm_bindgen]
    pub fn set_default_currency(&mut self, code: &str) -> Result<(), JsValue> {
        match Currency::from_code(code) {
            Some(currency) => {
                self.config.default_currency = currency;
                Ok(())
            }
            None => Err(JsValue::from_str(&format!(
                "unsupported currency code: {code}"
            ))),
        }
    }

    /// Extract receipt fields from recognized text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let receipt = self.run(text);
        serde_wasm_bindgen::to_value(&receipt).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extract receipt fields along with warnings and timing metadata.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let extractor = ReceiptFieldExtractor::new().with_config(self.config.clone());
        let result = extractor.parse(text);

        #[derive(serde::Serialize)]
        struct ExtractResult {
            receipt: ExtractedReceipt,
            warnings: Vec<String>,
            processing_time_ms: u64,
        }

        let output = ExtractResult {
            receipt: result.receipt,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
        };

        serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extract and finalize into an expense record pre-filled for the form.
    #[wasm_bindgen]
    pub fn to_expense_record(&self, text: &str) -> Result<JsValue, JsValue> {
        let receipt = self.run(text);
        let record = ExpenseRecord::from_receipt(&receipt, text);
        serde_wasm_bindgen::to_value(&record).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn run(&self, text: &str) -> ExtractedReceipt {
        ReceiptFieldExtractor::new()
            .with_config(self.config.clone())
            .extract(text)
    }
}

impl Default for ReceiptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_parse_amount_token() {
        assert!((parse_amount_token("Rp45.000") - 45000.0).abs() < 0.01);
        assert!((parse_amount_token("12,500.00") - 12500.0).abs() < 0.01);
    }

    #[wasm_bindgen_test]
    fn test_detect_currency_code() {
        assert_eq!(detect_currency_code("$10.00"), "USD");
        assert_eq!(detect_currency_code("Rp45.000"), "IDR");
    }

    #[wasm_bindgen_test]
    fn test_set_default_currency_rejects_unknown() {
        let mut extractor = ReceiptExtractor::new();
        assert!(extractor.set_default_currency("SGD").is_ok());
        assert!(extractor.set_default_currency("XYZ").is_err());
    }
}
