//! Error types for the struk-core library.

use thiserror::Error;

/// Main error type for the struk library.
#[derive(Error, Debug)]
pub enum StrukError {
    /// Text recognition error from the upstream engine.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// Scan boundary error.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the upstream text-recognition collaborator.
///
/// The extraction engine itself has no error kind: every extractor is total
/// over its input and degrades confidence instead of failing.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The recognition engine could not be initialized.
    #[error("failed to initialize recognition engine: {0}")]
    Init(String),

    /// The input is not a supported image encoding (JPEG, PNG, WebP).
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The input image exceeds the configured size limit.
    #[error("image is {size} bytes, exceeding the {limit} byte limit")]
    ImageTooLarge { size: usize, limit: usize },

    /// The request was cancelled through its cancellation token.
    #[error("recognition cancelled")]
    Cancelled,

    /// The recognition engine failed mid-request.
    #[error("recognition engine failed: {0}")]
    Engine(String),
}

/// Errors surfaced at the scan boundary (recognition plus extraction).
#[derive(Error, Debug)]
pub enum ScanError {
    /// Recognition failed or was unsupported; extraction was never invoked.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// Recognition succeeded but produced no usable text. Callers should show
    /// a warning and fall back to manual entry, not treat this as a crash.
    #[error("no text detected in the image")]
    EmptyText,
}

/// Result type for the struk library.
pub type Result<T> = std::result::Result<T, StrukError>;
