//! Line item extraction from `<name> <amount>` lines.

use rust_decimal::Decimal;

use crate::models::config::ExtractionConfig;
use crate::models::receipt::LineItem;

use super::amounts::parse_amount;
use super::patterns::ITEM_LINE;

/// Extract purchased items, in the order encountered.
///
/// A line qualifies when it has the whole-line `<name> <amount>` shape, is
/// neither a header nor a total/subtotal summary line, the trimmed name is
/// longer than 2 characters, and the amount parses to a positive value.
pub fn extract_items(lines: &[&str], config: &ExtractionConfig) -> Vec<LineItem> {
    let mut items = Vec::new();

    for (line_index, line) in lines.iter().enumerate() {
        let Some(caps) = ITEM_LINE.captures(line) else {
            continue;
        };
        if config.keywords.is_header_line(line) || config.keywords.is_summary_line(line) {
            continue;
        }

        // Same bare-token rule as the amount scanner: an ungrouped number
        // without an Rp prefix is a house number or a count, not a price.
        let has_prefix = caps.get(2).is_some();
        let numeric = &caps[3];
        if !has_prefix && !numeric.contains([',', '.']) {
            continue;
        }

        let name = caps[1].trim();
        let amount = parse_amount(numeric);
        if name.chars().count() > 2 && amount > Decimal::ZERO {
            items.push(LineItem {
                name: name.to_string(),
                amount,
                line_index,
            });
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    #[test]
    fn extracts_items_in_order() {
        let lines = vec!["Cappuccino Rp45.000", "Roti Bakar 12.500", "Es Teh Rp5.000"];
        let items = extract_items(&lines, &config());

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Cappuccino");
        assert_eq!(items[0].amount, Decimal::from_str("45000").unwrap());
        assert_eq!(items[1].name, "Roti Bakar");
        assert_eq!(items[1].amount, Decimal::from_str("12500").unwrap());
        assert_eq!(items[2].line_index, 2);
    }

    #[test]
    fn skips_header_and_summary_lines() {
        let lines = vec![
            "Struk Pembelian 12.000",
            "Cappuccino Rp45.000",
            "Subtotal Rp45.000",
            "Total Rp45.000",
        ];
        let items = extract_items(&lines, &config());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Cappuccino");
    }

    #[test]
    fn skips_short_names_and_bare_integers() {
        let lines = vec!["ab 12.000", "Jl. Sudirman No. 1"];
        assert!(extract_items(&lines, &config()).is_empty());
    }

    #[test]
    fn skips_lines_without_the_shape() {
        let lines = vec!["STARBUCKS COFFEE", "25/12/2023 14:30"];
        assert!(extract_items(&lines, &config()).is_empty());
    }
}
