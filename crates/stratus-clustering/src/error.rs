//! Error types for the clustering client

use stratus_results::ResultError;
use thiserror::Error;

/// Clustering client error
#[derive(Debug, Error)]
pub enum ClusteringError {
    /// Response could not be extracted
    #[error("extraction error: {0}")]
    Results(#[from] ResultError),

    /// Request body could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required option was left empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An option holds a value the service would reject
    #[error("invalid option `{field}`: {reason}")]
    InvalidOption { field: &'static str, reason: String },

    /// Service answered with an unexpected status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The API client failed before a response arrived
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type for clustering operations
pub type Result<T> = std::result::Result<T, ClusteringError>;
