//! End-to-end receipt scanning: image bytes in, structured receipt out.

use tracing::{debug, info, warn};

use crate::error::ScanError;
use crate::extract::{ReceiptFieldExtractor, ReceiptParser};
use crate::models::config::StrukConfig;
use crate::models::receipt::ExtractedReceipt;
use crate::recognition::{sniff_format, RecognitionContext, RecognitionError, TextRecognizer};

/// Result of scanning one receipt image.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// The full recognized text, kept for user review and correction.
    pub raw_text: String,
    /// Engine-reported recognition confidence.
    pub overall_confidence: f32,
    /// The extracted receipt fields.
    pub receipt: ExtractedReceipt,
    /// Warnings from recognition and extraction.
    pub warnings: Vec<String>,
}

/// Drives recognition and extraction over one image.
///
/// Progress is reported on the caller's context: validation ends at 0.2,
/// recognition maps into the 0.2..0.9 band, extraction finishes at 1.0.
pub struct ReceiptScanner<R: TextRecognizer> {
    recognizer: R,
    extractor: ReceiptFieldExtractor,
    config: StrukConfig,
}

impl<R: TextRecognizer> ReceiptScanner<R> {
    /// Scanner with default configuration.
    pub fn new(recognizer: R) -> Self {
        Self::with_config(recognizer, StrukConfig::default())
    }

    /// Scanner with explicit configuration.
    pub fn with_config(recognizer: R, config: StrukConfig) -> Self {
        let extractor = ReceiptFieldExtractor::new().with_config(config.extraction.clone());
        Self {
            recognizer,
            extractor,
            config,
        }
    }

    /// Give the recognizer back, consuming the scanner.
    pub fn into_recognizer(self) -> R {
        self.recognizer
    }

    /// Scan one encoded receipt image.
    pub fn scan(
        &mut self,
        image: &[u8],
        ctx: &RecognitionContext,
    ) -> Result<ScanResult, ScanError> {
        let limit = self.config.recognition.max_image_bytes;
        if image.len() > limit {
            return Err(RecognitionError::ImageTooLarge {
                size: image.len(),
                limit,
            }
            .into());
        }

        let format = sniff_format(image)?;
        debug!("scanning {:?} image ({} bytes)", format, image.len());
        ctx.report(0.2);
        ctx.check_cancelled()?;

        let forward = |p: f32| ctx.report(0.2 + p * 0.7);
        let inner = RecognitionContext::new()
            .with_progress(&forward)
            .with_cancel(ctx.cancel_token());
        let recognized = self.recognizer.recognize(image, &inner)?;

        if recognized.text.trim().is_empty() {
            warn!("recognition produced no usable text");
            return Err(ScanError::EmptyText);
        }

        let mut warnings = Vec::new();
        if recognized.confidence < self.config.recognition.min_confidence {
            warnings.push(format!(
                "low recognition confidence ({:.2}), results may need manual correction",
                recognized.confidence
            ));
        }

        let extraction = self.extractor.parse(&recognized.text);
        warnings.extend(extraction.warnings);
        ctx.report(1.0);

        info!(
            "scan complete in {}ms with {} warnings",
            extraction.processing_time_ms,
            warnings.len()
        );

        Ok(ScanResult {
            raw_text: recognized.text,
            overall_confidence: recognized.confidence,
            receipt: extraction.receipt,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::mock::MockRecognizer;
    use crate::recognition::CancelToken;
    use pretty_assertions::assert_eq;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn receipt_text() -> &'static str {
        "STARBUCKS COFFEE\n25/12/2023 14:30\nCappuccino Rp45.000\nTotal Rp45.000"
    }

    #[test]
    fn scans_image_to_receipt() {
        let mut scanner = ReceiptScanner::new(MockRecognizer::new(receipt_text()));
        let result = scanner.scan(PNG_MAGIC, &RecognitionContext::new()).unwrap();

        assert_eq!(result.raw_text, receipt_text());
        assert_eq!(
            result.receipt.merchant.value.as_deref(),
            Some("STARBUCKS COFFEE")
        );
        assert!(result.receipt.total.is_some());
    }

    #[test]
    fn empty_recognized_text_is_an_error() {
        let mut scanner = ReceiptScanner::new(MockRecognizer::new("   \n  "));
        let err = scanner
            .scan(PNG_MAGIC, &RecognitionContext::new())
            .unwrap_err();
        assert!(matches!(err, ScanError::EmptyText));
    }

    #[test]
    fn rejects_unsupported_format() {
        let mut scanner = ReceiptScanner::new(MockRecognizer::new(receipt_text()));
        let err = scanner
            .scan(b"GIF89a", &RecognitionContext::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::Recognition(RecognitionError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_oversized_image() {
        let mut config = StrukConfig::default();
        config.recognition.max_image_bytes = 4;
        let mut scanner = ReceiptScanner::with_config(MockRecognizer::new(receipt_text()), config);
        let err = scanner
            .scan(PNG_MAGIC, &RecognitionContext::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::Recognition(RecognitionError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn cancellation_aborts_the_scan() {
        let token = CancelToken::new();
        token.cancel();
        let ctx = RecognitionContext::new().with_cancel(token);
        let mut scanner = ReceiptScanner::new(MockRecognizer::new(receipt_text()));
        let err = scanner.scan(PNG_MAGIC, &ctx).unwrap_err();
        assert!(matches!(
            err,
            ScanError::Recognition(RecognitionError::Cancelled)
        ));
    }

    #[test]
    fn progress_stays_inside_the_band() {
        let seen = std::cell::RefCell::new(Vec::new());
        let callback = |p: f32| seen.borrow_mut().push(p);
        let ctx = RecognitionContext::new().with_progress(&callback);
        let mut scanner = ReceiptScanner::new(MockRecognizer::new(receipt_text()));
        scanner.scan(PNG_MAGIC, &ctx).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.first(), Some(&0.2));
        assert_eq!(seen.last(), Some(&1.0));
        assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)));
        // Mock reports 0.5 and 1.0, forwarded into the recognition band.
        assert!(seen.contains(&0.55));
        assert!(seen.contains(&0.9));
    }

    #[test]
    fn low_confidence_adds_a_warning() {
        let recognizer = MockRecognizer::new(receipt_text()).with_confidence(0.2);
        let mut scanner = ReceiptScanner::new(recognizer);
        let result = scanner.scan(PNG_MAGIC, &RecognitionContext::new()).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("low recognition confidence")));
    }
}
