//! Error types for result extraction

use thiserror::Error;

/// Extraction error
#[derive(Debug, Error)]
pub enum ResultError {
    /// Timestamp field held something other than an RFC3339 string
    #[error("cannot parse time for field `{field}`: {value}")]
    TimeParse { field: String, value: String },

    /// JSON value kind does not fit the declared field type
    #[error("type mismatch for field `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A record was asked to store a field or component it does not declare
    #[error("record `{record}` has no field or component `{name}`")]
    UnknownField { record: &'static str, name: String },

    /// API version token is not `major.minor`
    #[error("invalid API version: {0}")]
    InvalidVersion(String),

    /// Response body is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResultError {
    pub(crate) fn mismatch(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        ResultError::TypeMismatch {
            field: field.into(),
            expected,
            found: crate::document::kind_of(found),
        }
    }
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ResultError>;
