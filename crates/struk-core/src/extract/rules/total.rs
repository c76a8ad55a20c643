//! Total-amount resolution over the detected amounts.

use crate::models::config::ExtractionConfig;
use crate::models::receipt::{MonetaryAmount, ResolvedTotal, TotalKind};

/// Pick the amount that represents the receipt's grand total.
///
/// Scans the descending-sorted amounts for one whose source line carries a
/// total keyword. Failing that, the largest amount is assumed to be the
/// total at reduced confidence. With no amounts at all there is no total and
/// the caller leaves the field for manual entry.
pub fn resolve_total(
    amounts: &[MonetaryAmount],
    config: &ExtractionConfig,
) -> Option<ResolvedTotal> {
    for amount in amounts {
        if config.keywords.is_total_line(&amount.line) {
            return Some(ResolvedTotal {
                amount: amount.clone(),
                kind: TotalKind::Total,
                confidence: config.confidence.labeled_total,
            });
        }
    }

    amounts.first().map(|largest| ResolvedTotal {
        amount: largest.clone(),
        kind: TotalKind::AssumedTotal,
        confidence: config.confidence.assumed_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::amounts::extract_amounts;
    use crate::models::receipt::Currency;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    #[test]
    fn keyword_line_wins_over_larger_amount() {
        let lines = vec!["Deposit Rp100.000", "Total bayar Rp45.000"];
        let amounts = extract_amounts(&lines, &config());
        let total = resolve_total(&amounts, &config()).unwrap();

        assert_eq!(total.kind, TotalKind::Total);
        assert_eq!(total.value(), Decimal::from_str("45000").unwrap());
        assert_eq!(total.currency(), Currency::Idr);
        assert_eq!(total.confidence, 0.9);
    }

    #[test]
    fn falls_back_to_largest_amount() {
        let lines = vec!["Kopi Rp20.000", "Roti Rp45.000"];
        let amounts = extract_amounts(&lines, &config());
        let total = resolve_total(&amounts, &config()).unwrap();

        assert_eq!(total.kind, TotalKind::AssumedTotal);
        assert_eq!(total.value(), Decimal::from_str("45000").unwrap());
        assert_eq!(total.confidence, 0.6);
    }

    #[test]
    fn no_amounts_means_no_total() {
        assert!(resolve_total(&[], &config()).is_none());
    }

    #[test]
    fn total_references_an_element_of_amounts() {
        let lines = vec!["Kopi Rp20.000", "Total Rp65.000"];
        let amounts = extract_amounts(&lines, &config());
        let total = resolve_total(&amounts, &config()).unwrap();
        assert!(amounts.contains(&total.amount));
    }
}
