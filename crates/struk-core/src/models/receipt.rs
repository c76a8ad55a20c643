//! Receipt data model produced by the extraction pipeline.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supported receipt currencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indonesian rupiah, the system default.
    #[default]
    Idr,
    /// US dollar.
    Usd,
    /// Singapore dollar.
    Sgd,
    /// Malaysian ringgit.
    Myr,
}

impl Currency {
    /// ISO 4217 code for this currency.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Idr => "IDR",
            Currency::Usd => "USD",
            Currency::Sgd => "SGD",
            Currency::Myr => "MYR",
        }
    }

    /// Parse an ISO 4217 code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "IDR" => Some(Currency::Idr),
            "USD" => Some(Currency::Usd),
            "SGD" => Some(Currency::Sgd),
            "MYR" => Some(Currency::Myr),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A value paired with a confidence score and its supporting evidence line.
///
/// Every extracted field travels in this shape so confidence stays attached
/// to the value. A field with no match has `value: None` and confidence 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult<T> {
    /// Extracted value, if any.
    pub value: Option<T>,
    /// Heuristic confidence in [0, 1]. Not a calibrated probability.
    pub confidence: f32,
    /// The source line the value was read from.
    pub evidence_line: String,
}

impl<T> FieldResult<T> {
    /// A field with a value, its confidence, and the line it came from.
    pub fn new(value: T, confidence: f32, evidence_line: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            confidence,
            evidence_line: evidence_line.into(),
        }
    }

    /// The documented no-match default: null value, zero confidence.
    pub fn none() -> Self {
        Self {
            value: None,
            confidence: 0.0,
            evidence_line: String::new(),
        }
    }

    /// Whether a value was extracted.
    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for FieldResult<T> {
    fn default() -> Self {
        Self::none()
    }
}

/// A parsed numeric value with currency and source-line provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    /// The raw matched token, including any currency marker.
    pub raw: String,
    /// Normalized numeric value; always positive once recorded.
    pub value: Decimal,
    /// Detected currency.
    pub currency: Currency,
    /// Index of the source line in the normalized line sequence.
    pub line_index: usize,
    /// The full source line.
    pub line: String,
}

/// A matched date token and its normalized calendar date.
///
/// The raw match and the parsed date are independent: a shape can match while
/// normalization fails, in which case `parsed` is `None` but `raw` is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    /// The raw matched substring.
    pub raw: String,
    /// Normalized calendar date, when the components form a valid date.
    pub parsed: Option<NaiveDate>,
}

/// A purchased item read from a `<name> <amount>` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name, trimmed; always longer than 2 characters.
    pub name: String,
    /// Item amount; always positive.
    pub amount: Decimal,
    /// Index of the source line in the normalized line sequence.
    pub line_index: usize,
}

/// How the total amount was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalKind {
    /// A detected amount whose line carries a total keyword.
    Total,
    /// No keyword line matched; the largest detected amount was assumed.
    AssumedTotal,
}

/// The amount resolved as the receipt's grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTotal {
    /// The selected amount; always one element of the receipt's `amounts`.
    pub amount: MonetaryAmount,
    /// How the amount was selected.
    pub kind: TotalKind,
    /// Heuristic confidence in [0, 1].
    pub confidence: f32,
}

impl ResolvedTotal {
    /// Numeric value of the total.
    pub fn value(&self) -> Decimal {
        self.amount.value
    }

    /// Currency of the total; equals the currency of its source amount.
    pub fn currency(&self) -> Currency {
        self.amount.currency
    }
}

/// A detected tax amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAmount {
    /// The raw matched amount token.
    pub raw: String,
    /// Normalized tax value.
    pub value: Decimal,
    /// Detected currency.
    pub currency: Currency,
    /// The full source line.
    pub line: String,
    /// Heuristic confidence in [0, 1].
    pub confidence: f32,
}

/// Structured fields extracted from one recognized receipt text.
///
/// The sole output of the extraction pipeline. Immutable once produced;
/// callers copy fields into an editable form model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedReceipt {
    /// Merchant name; a low-confidence fallback is used when no shape matches.
    pub merchant: FieldResult<String>,
    /// Transaction date.
    pub date: FieldResult<DateValue>,
    /// Transaction time, as matched (no timezone handling).
    pub time: FieldResult<String>,
    /// All detected amounts, sorted descending by value (stable on ties).
    pub amounts: Vec<MonetaryAmount>,
    /// Resolved total; `None` when no amounts were detected.
    pub total: Option<ResolvedTotal>,
    /// Detected tax; `None` when no tax line was found.
    pub tax: Option<TaxAmount>,
    /// Line items, in the order encountered.
    pub items: Vec<LineItem>,
}
