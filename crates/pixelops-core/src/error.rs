//! Error types for transformation operations.

use thiserror::Error;

/// Errors returned by the transformation engine.
///
/// Every failure is a deterministic function of the inputs, so none of these
/// are worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A parameter is outside its documented domain (angle, flip mode,
    /// noise kind, blend alpha, noise settings).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The crop rectangle does not fit inside the image.
    ///
    /// Deliberately carries no detail about which bound failed.
    #[error("Crop dimensions not valid")]
    InvalidCropRectangle,
}

impl TransformError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TransformError::InvalidParameter(message.into())
    }
}

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;
