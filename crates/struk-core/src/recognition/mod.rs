//! Text recognition boundary.
//!
//! The extraction pipeline consumes plain text; where that text comes from is
//! behind the [`TextRecognizer`] trait. Host applications plug in a real OCR
//! engine, tests use [`mock::MockRecognizer`].

pub mod mock;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

pub use crate::error::RecognitionError;

/// Output of one recognition run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedText {
    /// The recognized text, line structure preserved.
    pub text: String,
    /// Engine-reported confidence in [0.0, 1.0].
    pub confidence: f32,
}

/// Shared cancellation flag for long-running recognition.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next checkpoint.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Per-run recognition context: progress reporting and cancellation.
pub struct RecognitionContext<'a> {
    on_progress: Option<&'a (dyn Fn(f32) + 'a)>,
    cancel: CancelToken,
}

impl<'a> RecognitionContext<'a> {
    pub fn new() -> Self {
        Self {
            on_progress: None,
            cancel: CancelToken::new(),
        }
    }

    /// Attach a progress callback. Receives fractions in [0.0, 1.0].
    pub fn with_progress(mut self, callback: &'a (dyn Fn(f32) + 'a)) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Attach an externally held cancellation token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Report progress, clamped to [0.0, 1.0].
    pub fn report(&self, progress: f32) {
        if let Some(callback) = self.on_progress {
            callback(progress.clamp(0.0, 1.0));
        }
    }

    pub fn cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fail with [`RecognitionError::Cancelled`] if cancellation was requested.
    pub fn check_cancelled(&self) -> Result<(), RecognitionError> {
        if self.cancelled() {
            Err(RecognitionError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// A clone of the cancellation token, for forwarding to inner contexts.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl Default for RecognitionContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// A text recognition engine over encoded image bytes.
pub trait TextRecognizer {
    /// Recognize text in an encoded image.
    ///
    /// Implementations should call [`RecognitionContext::check_cancelled`] at
    /// their natural checkpoints and report progress when they can.
    fn recognize(
        &mut self,
        image: &[u8],
        ctx: &RecognitionContext,
    ) -> Result<RecognizedText, RecognitionError>;
}

/// Sniff the image format from magic bytes, rejecting unsupported formats.
pub fn sniff_format(image: &[u8]) -> Result<ImageFormat, RecognitionError> {
    let format = image::guess_format(image)
        .map_err(|_| RecognitionError::UnsupportedFormat("unknown".to_string()))?;
    match format {
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP => Ok(format),
        other => Err(RecognitionError::UnsupportedFormat(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn sniffs_png_and_jpeg() {
        assert_eq!(sniff_format(PNG_MAGIC).unwrap(), ImageFormat::Png);
        assert_eq!(sniff_format(JPEG_MAGIC).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn sniffs_webp() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(b"WEBP");
        assert_eq!(sniff_format(&bytes).unwrap(), ImageFormat::WebP);
    }

    #[test]
    fn rejects_gif() {
        let err = sniff_format(b"GIF89a").unwrap_err();
        assert!(matches!(err, RecognitionError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_garbage() {
        let err = sniff_format(b"not an image").unwrap_err();
        assert!(matches!(err, RecognitionError::UnsupportedFormat(_)));
    }

    #[test]
    fn cancel_token_is_shared_across_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn context_clamps_progress() {
        let seen = std::cell::RefCell::new(Vec::new());
        let callback = |p: f32| seen.borrow_mut().push(p);
        let ctx = RecognitionContext::new().with_progress(&callback);
        ctx.report(-0.5);
        ctx.report(0.5);
        ctx.report(1.5);
        assert_eq!(*seen.borrow(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn check_cancelled_surfaces_cancellation() {
        let token = CancelToken::new();
        let ctx = RecognitionContext::new().with_cancel(token.clone());
        assert!(ctx.check_cancelled().is_ok());
        token.cancel();
        assert!(matches!(
            ctx.check_cancelled(),
            Err(RecognitionError::Cancelled)
        ));
    }
}
