//! Extraction configuration

use serde::{Deserialize, Serialize};

/// Header carrying the microversion on current services
pub const API_VERSION_HEADER: &str = "OpenStack-API-Version";

/// Legacy compute-specific microversion header
pub const LEGACY_API_VERSION_HEADER: &str = "X-OpenStack-Nova-API-Version";

/// Where to find the API version a response was served at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Response headers to consult, first match wins
    pub version_headers: Vec<String>,
    /// Only accept service-qualified values (`"clustering 1.10"`) for this
    /// service type; bare values are always accepted
    pub service_type: Option<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            version_headers: vec![
                API_VERSION_HEADER.to_string(),
                LEGACY_API_VERSION_HEADER.to_string(),
            ],
            service_type: None,
        }
    }
}

impl ExtractConfig {
    /// Config scoped to a single service type
    pub fn for_service(service_type: impl Into<String>) -> Self {
        Self {
            service_type: Some(service_type.into()),
            ..Default::default()
        }
    }
}
