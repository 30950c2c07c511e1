use thiserror::Error;

/// Validation and contract errors exposed by `kabuchart-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("security code cannot be empty")]
    EmptySecurityCode,
    #[error("security code length {len} exceeds max {max}")]
    SecurityCodeTooLong { len: usize, max: usize },
    #[error("security code contains invalid character '{ch}' at index {index}")]
    SecurityCodeInvalidChar { ch: char, index: usize },

    #[error("search query cannot be empty")]
    EmptyQuery,

    #[error("date must be YYYYMMDD or YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("date range start {from} is after end {to}")]
    InvertedDateRange { from: String, to: String },

    #[error("invalid locale '{value}', expected one of ja, en")]
    InvalidLocale { value: String },
    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("timeout must be a positive number of milliseconds: '{value}'")]
    InvalidTimeout { value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
