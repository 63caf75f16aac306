//! Decoded API responses
//!
//! The API client hands back a [`Response`]: the status code, the decoded
//! body and the response headers. Extraction reads the body; map projection
//! additionally reads the API version header.

use crate::config::ExtractConfig;
use crate::document::{Document, Object};
use crate::error::Result;
use crate::extract;
use crate::record::Record;
use crate::version::ApiVersion;
use std::collections::BTreeMap;

/// A single API response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Decoded body (`null` when the response had none)
    pub body: Document,
    /// Headers keyed by lowercased name
    headers: BTreeMap<String, String>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200, Document::Null)
    }
}

impl Response {
    pub fn new(status: u16, body: Document) -> Self {
        Self {
            status,
            body,
            headers: BTreeMap::new(),
        }
    }

    /// Parse a JSON body text into a 200 response
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(Self::new(200, serde_json::from_str(body)?))
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a header; names are case-insensitive
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// API version this response was served at, if the service said.
    pub fn api_version(&self, config: &ExtractConfig) -> Result<Option<ApiVersion>> {
        for name in &config.version_headers {
            if let Some(raw) = self.header(name) {
                if let Some(version) = parse_version_header(raw, config.service_type.as_deref())? {
                    return Ok(Some(version));
                }
            }
        }
        Ok(None)
    }

    // ==================== Extraction ====================

    /// Decode the object under `root`
    pub fn extract_into<R: Record>(&self, root: &str) -> Result<R> {
        extract::extract_into(&self.body, root)
    }

    /// Decode the array under `root`
    pub fn extract_slice_into<R: Record>(&self, root: &str) -> Result<Vec<R>> {
        extract::extract_slice_into(&self.body, root)
    }

    /// Project `record` at this response's API version
    pub fn extract_map<R: Record>(&self, record: &R, config: &ExtractConfig) -> Result<Object> {
        Ok(extract::project(record, self.api_version(config)?))
    }

    /// Project each of `records` at this response's API version
    pub fn extract_map_slice<R: Record>(
        &self,
        records: &[R],
        config: &ExtractConfig,
    ) -> Result<Vec<Object>> {
        Ok(extract::project_slice(records, self.api_version(config)?))
    }
}

/// Parse a version header value.
///
/// Accepts a bare version (`"2.10"`) or a comma-separated list of
/// `"<service> <version>"` entries. Returns `None` when no entry applies to
/// `service_type`.
fn parse_version_header(raw: &str, service_type: Option<&str>) -> Result<Option<ApiVersion>> {
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once(char::is_whitespace) {
            Some((service, version)) => {
                let applies = service_type.map_or(true, |s| s.eq_ignore_ascii_case(service));
                if applies {
                    return version.trim().parse().map(Some);
                }
            }
            None => return entry.parse().map(Some),
        }
    }
    Ok(None)
}
