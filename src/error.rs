//! Error types for vl-scatter operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving encodings or configuring scales.
#[derive(Error, Debug)]
pub enum Error {
    /// The feature is recognized but deliberately not supported
    /// (aggregation, array-valued opacity or size, shape encoding).
    #[error("Not implemented: {0}")]
    Unimplemented(String),

    /// A channel definition has no recognized data source, or names data
    /// that does not exist.
    #[error("Invalid specification: {0}")]
    InvalidSpecification(String),

    /// No scale is registered under the requested name.
    #[error("Unknown scale: {0}")]
    UnknownScale(String),

    /// A scale option could not be interpreted.
    #[error("Invalid scale option: {0}")]
    InvalidScaleOption(String),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::Unimplemented`] naming the unsupported feature.
    pub(crate) fn unimplemented(feature: impl Into<String>) -> Self {
        Error::Unimplemented(feature.into())
    }

    /// Shorthand for an [`Error::InvalidSpecification`].
    pub(crate) fn invalid_spec(msg: impl Into<String>) -> Self {
        Error::InvalidSpecification(msg.into())
    }
}
