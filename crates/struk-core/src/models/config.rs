//! Configuration structures for the scanning and extraction pipeline.

use serde::{Deserialize, Serialize};

use super::receipt::Currency;

/// Main configuration for the struk pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrukConfig {
    /// Text recognition configuration.
    pub recognition: RecognitionConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Text recognition (upstream engine) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Recognition language hint passed to the engine.
    pub language: String,

    /// Maximum accepted image size in bytes.
    pub max_image_bytes: usize,

    /// Overall confidence below which a low-confidence warning is attached.
    pub min_confidence: f32,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            max_image_bytes: 10 * 1024 * 1024,
            min_confidence: 0.5,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How many leading lines to scan for the merchant name.
    pub merchant_scan_lines: usize,

    /// Currency assumed when a token carries no currency marker.
    pub default_currency: Currency,

    /// Locale keyword lists driving line classification.
    pub keywords: KeywordTable,

    /// Per-field confidence weights.
    pub confidence: ConfidenceWeights,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            merchant_scan_lines: 5,
            default_currency: Currency::Idr,
            keywords: KeywordTable::default(),
            confidence: ConfidenceWeights::default(),
        }
    }
}

/// Locale keyword lists, matched case-insensitively by containment.
///
/// Defaults merge English and Indonesian terms, matching the receipts this
/// system was built for. Swap the lists to retarget another locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTable {
    /// Words marking the line that carries the grand total.
    pub total: Vec<String>,

    /// Document header words; lines with these are never items.
    pub header: Vec<String>,

    /// Summary words (total/subtotal); lines with these are never items.
    pub summary: Vec<String>,

    /// Tax line keywords.
    pub tax: Vec<String>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            total: to_strings(&["total", "grand total", "amount", "jumlah", "total bayar"]),
            header: to_strings(&["receipt", "invoice", "bill", "struk", "nota"]),
            summary: to_strings(&["total", "grand total", "subtotal", "jumlah"]),
            tax: to_strings(&["tax", "ppn", "pajak"]),
        }
    }
}

impl KeywordTable {
    /// Whether the line names the grand total.
    pub fn is_total_line(&self, line: &str) -> bool {
        contains_any(&self.total, line)
    }

    /// Whether the line is a document header.
    pub fn is_header_line(&self, line: &str) -> bool {
        contains_any(&self.header, line)
    }

    /// Whether the line is a total/subtotal summary.
    pub fn is_summary_line(&self, line: &str) -> bool {
        contains_any(&self.summary, line)
    }
}

fn contains_any(keywords: &[String], line: &str) -> bool {
    let lower = line.to_lowercase();
    keywords.iter().any(|k| lower.contains(k.as_str()))
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Per-field confidence weights.
///
/// The values are heuristic constants with no statistical basis; they are
/// configuration rather than code so deployments can tune them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceWeights {
    /// Merchant line matching a name shape.
    pub merchant_match: f32,

    /// Merchant fallback to the first line.
    pub merchant_fallback: f32,

    /// Date shape match.
    pub date: f32,

    /// Time shape match.
    pub time: f32,

    /// Total resolved from a keyword-bearing line.
    pub labeled_total: f32,

    /// Total assumed from the largest amount.
    pub assumed_total: f32,

    /// Tax line match.
    pub tax: f32,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            merchant_match: 0.8,
            merchant_fallback: 0.3,
            date: 0.9,
            time: 0.8,
            labeled_total: 0.9,
            assumed_total: 0.6,
            tax: 0.8,
        }
    }
}

impl StrukConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_match_documented_constants() {
        let weights = ConfidenceWeights::default();
        assert_eq!(weights.merchant_match, 0.8);
        assert_eq!(weights.merchant_fallback, 0.3);
        assert_eq!(weights.date, 0.9);
        assert_eq!(weights.labeled_total, 0.9);
        assert_eq!(weights.assumed_total, 0.6);
        assert_eq!(weights.tax, 0.8);
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let keywords = KeywordTable::default();
        assert!(keywords.is_total_line("GRAND TOTAL Rp100.000"));
        assert!(keywords.is_total_line("Jumlah: 50.000"));
        assert!(keywords.is_header_line("STRUK PEMBELIAN"));
        assert!(!keywords.is_total_line("Cappuccino Rp45.000"));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = StrukConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: StrukConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.extraction.merchant_scan_lines, 5);
        assert_eq!(parsed.extraction.default_currency, Currency::Idr);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: StrukConfig =
            serde_json::from_str(r#"{"extraction": {"merchant_scan_lines": 3}}"#).unwrap();
        assert_eq!(parsed.extraction.merchant_scan_lines, 3);
        assert_eq!(parsed.extraction.confidence.date, 0.9);
        assert_eq!(parsed.recognition.language, "eng");
    }
}
