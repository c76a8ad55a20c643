//! Receipt text interpretation engine.
//!
//! `struk-core` turns noisy recognized receipt text into structured,
//! confidence-scored fields: merchant, transaction date and time, monetary
//! amounts, tax, line items, and a resolved total. Recognition itself sits
//! behind the [`TextRecognizer`] trait so hosts can plug in any OCR engine;
//! the extraction layer is pure text heuristics tuned for Indonesian and
//! regional receipt formats.
//!
//! ```
//! use struk_core::ReceiptFieldExtractor;
//!
//! let receipt = ReceiptFieldExtractor::new()
//!     .extract("STARBUCKS COFFEE\nTotal Rp45.000");
//! assert_eq!(receipt.merchant.value.as_deref(), Some("STARBUCKS COFFEE"));
//! assert!(receipt.total.is_some());
//! ```

pub mod error;
pub mod extract;
pub mod models;
pub mod recognition;
pub mod scanner;

pub use error::{Result, ScanError, StrukError};
pub use extract::{ExtractionResult, ReceiptFieldExtractor, ReceiptParser};
pub use models::config::{
    ConfidenceWeights, ExtractionConfig, KeywordTable, RecognitionConfig, StrukConfig,
};
pub use models::expense::{suggest_category, ExpenseCategory, ExpenseRecord};
pub use models::receipt::{
    Currency, DateValue, ExtractedReceipt, FieldResult, LineItem, MonetaryAmount, ResolvedTotal,
    TaxAmount, TotalKind,
};
pub use recognition::{
    CancelToken, RecognitionContext, RecognitionError, RecognizedText, TextRecognizer,
};
pub use scanner::{ReceiptScanner, ScanResult};
