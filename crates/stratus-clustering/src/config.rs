//! Client configuration

use serde::{Deserialize, Serialize};
use stratus_results::ExtractConfig;

/// Service type the clustering API registers under
pub const SERVICE_TYPE: &str = "clustering";

/// Clustering client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// How to read the API version from responses
    pub extract: ExtractConfig,
    /// Page size used by list calls that do not set `limit`
    pub default_page_limit: Option<u32>,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            extract: ExtractConfig::for_service(SERVICE_TYPE),
            default_page_limit: None,
        }
    }
}
