use thiserror::Error;

/// Failures that can abort a single processing call.
///
/// Everything here is absorbed at the `Pipeline` boundary and converted into
/// an error-kind `ExtractionResult`; callers never see a raw `ProcessError`
/// unless they use the lower-level component APIs directly.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("text recognition failed: {0}")]
    Recognition(String),
}
