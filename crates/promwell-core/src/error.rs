//! Shared error type across promwell crates.

use thiserror::Error;

/// Stable machine-readable error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Metric or label name fails validation.
    InvalidName,
    /// Registration collides with a differently-shaped metric.
    DuplicateMetric,
    /// Counter increment with a negative delta.
    NegativeDelta,
    /// Lookup of a metric that was never registered.
    NotFound,
    /// Label values do not match the declared label names.
    LabelMismatch,
    /// Histogram bucket boundaries are malformed.
    InvalidBuckets,
    /// Configuration rejected at load time.
    InvalidConfig,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and operator-facing responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::DuplicateMetric => "DUPLICATE_METRIC",
            ErrorCode::NegativeDelta => "NEGATIVE_DELTA",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::LabelMismatch => "LABEL_MISMATCH",
            ErrorCode::InvalidBuckets => "INVALID_BUCKETS",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PromwellError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum PromwellError {
    #[error("invalid metric name: {0:?}")]
    InvalidName(String),
    #[error("duplicate metric: {0}")]
    DuplicateMetric(String),
    #[error("negative counter delta: {0}")]
    NegativeDelta(f64),
    #[error("metric not found: {0}")]
    NotFound(String),
    #[error("label mismatch for {name}: expected {expected} values, got {got}")]
    LabelMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid histogram buckets: {0}")]
    InvalidBuckets(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PromwellError {
    /// Map the error to a stable machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PromwellError::InvalidName(_) => ErrorCode::InvalidName,
            PromwellError::DuplicateMetric(_) => ErrorCode::DuplicateMetric,
            PromwellError::NegativeDelta(_) => ErrorCode::NegativeDelta,
            PromwellError::NotFound(_) => ErrorCode::NotFound,
            PromwellError::LabelMismatch { .. } => ErrorCode::LabelMismatch,
            PromwellError::InvalidBuckets(_) => ErrorCode::InvalidBuckets,
            PromwellError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            PromwellError::Internal(_) => ErrorCode::Internal,
        }
    }
}
