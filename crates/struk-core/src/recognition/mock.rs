//! Mock recognizer for tests and demos.

use super::{RecognitionContext, RecognitionError, RecognizedText, TextRecognizer};

/// A recognizer that returns a canned text instead of running OCR.
pub struct MockRecognizer {
    text: String,
    confidence: f32,
    fail_init: bool,
}

impl MockRecognizer {
    /// A recognizer that always returns `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 0.92,
            fail_init: false,
        }
    }

    /// Override the reported confidence.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// A recognizer whose every call fails as if engine startup broke.
    pub fn failing() -> Self {
        Self {
            text: String::new(),
            confidence: 0.0,
            fail_init: true,
        }
    }
}

impl TextRecognizer for MockRecognizer {
    fn recognize(
        &mut self,
        _image: &[u8],
        ctx: &RecognitionContext,
    ) -> Result<RecognizedText, RecognitionError> {
        if self.fail_init {
            return Err(RecognitionError::Init(
                "mock engine configured to fail".to_string(),
            ));
        }
        ctx.check_cancelled()?;
        ctx.report(0.5);
        ctx.check_cancelled()?;
        ctx.report(1.0);
        Ok(RecognizedText {
            text: self.text.clone(),
            confidence: self.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::CancelToken;

    #[test]
    fn returns_canned_text() {
        let mut recognizer = MockRecognizer::new("Total Rp45.000").with_confidence(0.7);
        let ctx = RecognitionContext::new();
        let result = recognizer.recognize(&[], &ctx).unwrap();
        assert_eq!(result.text, "Total Rp45.000");
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn failing_mock_reports_init_error() {
        let mut recognizer = MockRecognizer::failing();
        let ctx = RecognitionContext::new();
        assert!(matches!(
            recognizer.recognize(&[], &ctx),
            Err(RecognitionError::Init(_))
        ));
    }

    #[test]
    fn honors_cancellation() {
        let token = CancelToken::new();
        token.cancel();
        let ctx = RecognitionContext::new().with_cancel(token);
        let mut recognizer = MockRecognizer::new("text");
        assert!(matches!(
            recognizer.recognize(&[], &ctx),
            Err(RecognitionError::Cancelled)
        ));
    }
}
