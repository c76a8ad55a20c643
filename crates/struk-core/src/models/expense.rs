//! Finalized expense record handed to the persistence/approval subsystem.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::receipt::{Currency, ExtractedReceipt};

/// Expense category suggested from the merchant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Meals,
    Accommodation,
    Transport,
    Fuel,
}

impl ExpenseCategory {
    /// The snake_case label used in serialized records.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Meals => "meals",
            ExpenseCategory::Accommodation => "accommodation",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Fuel => "fuel",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Suggest a category from merchant-name keywords.
pub fn suggest_category(merchant: &str) -> Option<ExpenseCategory> {
    let merchant = merchant.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| merchant.contains(w));

    if has(&["restaurant", "cafe", "food"]) {
        Some(ExpenseCategory::Meals)
    } else if has(&["hotel", "inn"]) {
        Some(ExpenseCategory::Accommodation)
    } else if has(&["taxi", "uber", "grab"]) {
        Some(ExpenseCategory::Transport)
    } else if has(&["shell", "pertamina", "gas"]) {
        Some(ExpenseCategory::Fuel)
    } else {
        None
    }
}

/// The editable form model, finalized into an expense record on confirmation.
///
/// Pre-populated from an [`ExtractedReceipt`]; every field may be overwritten
/// manually before the record is emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Merchant name.
    pub merchant: String,

    /// Transaction date.
    pub date: Option<NaiveDate>,

    /// Transaction time, as printed on the receipt.
    pub time: Option<String>,

    /// Expense amount; zero when no total was resolved.
    pub amount: Decimal,

    /// Expense currency.
    pub currency: Currency,

    /// Tax amount; zero when no tax line was found.
    pub tax: Decimal,

    /// Suggested or user-selected category.
    pub category: Option<ExpenseCategory>,

    /// The raw recognized text the fields were extracted from.
    pub raw_text: String,
}

impl ExpenseRecord {
    /// Pre-populate a record from an extraction result.
    pub fn from_receipt(receipt: &ExtractedReceipt, raw_text: impl Into<String>) -> Self {
        let merchant = receipt.merchant.value.clone().unwrap_or_default();
        let category = suggest_category(&merchant);

        Self {
            category,
            date: receipt.date.value.as_ref().and_then(|d| d.parsed),
            time: receipt.time.value.clone(),
            amount: receipt.total.as_ref().map(|t| t.value()).unwrap_or_default(),
            currency: receipt
                .total
                .as_ref()
                .map(|t| t.currency())
                .unwrap_or_default(),
            tax: receipt.tax.as_ref().map(|t| t.value).unwrap_or_default(),
            raw_text: raw_text.into(),
            merchant,
        }
    }
}
