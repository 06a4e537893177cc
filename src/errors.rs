//! Shared error types for the cost modeling engine.

use thiserror::Error;

/// Main error type for cost document and metric operations.
///
/// The editing and aggregation layers recover from these as close to the
/// source as possible; nothing here is allowed to propagate into the
/// rendering layer as an unhandled failure.
#[derive(Debug, Error)]
pub enum CostError {
    /// A dotted path could not be applied to the document
    #[error("invalid path '{path}': {reason}")]
    BadPath { path: String, reason: String },

    /// The document held the wrong shape at an expected key
    #[error("expected {expected} at '{path}'")]
    TypeMismatch { path: String, expected: &'static str },

    /// Input rejected at the edit boundary
    #[error("validation error: {0}")]
    Validation(String),

    /// A category key that is neither standard nor registered
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// JSON errors at the wire boundary
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CostError {
    /// Create a path error with context
    pub fn bad_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a type mismatch error for a path
    pub fn type_mismatch(path: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, CostError>;
