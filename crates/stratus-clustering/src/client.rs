//! API client seam
//!
//! Transport, authentication, URL building and page cursors live behind
//! [`ApiClient`]. Operations in this crate describe each call as an
//! [`ApiRequest`] and consume the decoded [`Response`].

use crate::config::ClusteringConfig;
use crate::error::{ClusteringError, Result};
use async_trait::async_trait;
use stratus_results::{Document, Response};

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// One call against the clustering endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the service endpoint, e.g. `receivers/{id}`
    pub path: String,
    /// Query parameters in order
    pub query: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Document>,
    /// Status codes that count as success
    pub ok_codes: Vec<u16>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            ok_codes: vec![200],
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Option<Document>) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Document) -> Self {
        Self::new(Method::Patch, path).with_body(Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path).with_ok_codes(&[204])
    }

    pub fn with_body(mut self, body: Option<Document>) -> Self {
        self.body = body;
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_ok_codes(mut self, codes: &[u16]) -> Self {
        self.ok_codes = codes.to_vec();
        self
    }

    /// Check whether `status` counts as success for this request
    pub fn accepts(&self, status: u16) -> bool {
        self.ok_codes.contains(&status)
    }
}

/// Transport collaborator
///
/// Implementations perform the HTTP exchange, decode the JSON body and
/// surface response headers. Transport failures map to
/// [`ClusteringError::Transport`].
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Perform a single call
    async fn request(&self, request: &ApiRequest) -> Result<Response>;

    /// Fetch the page following `current` for a list `request`.
    ///
    /// Returns `None` when `current` was the last page.
    async fn next_page(
        &self,
        request: &ApiRequest,
        current: &Response,
    ) -> Result<Option<Response>> {
        let _ = (request, current);
        Ok(None)
    }

    /// Client configuration
    fn config(&self) -> ClusteringConfig {
        ClusteringConfig::default()
    }
}

/// Perform `request` and reject unexpected status codes
pub(crate) async fn send<C: ApiClient + ?Sized>(
    client: &C,
    request: &ApiRequest,
) -> Result<Response> {
    let response = client.request(request).await?;
    check_status(request, response)
}

pub(crate) fn check_status(request: &ApiRequest, response: Response) -> Result<Response> {
    if request.accepts(response.status) {
        return Ok(response);
    }
    let message = match &response.body {
        Document::Null => String::new(),
        Document::String(s) => s.clone(),
        other => other.to_string(),
    };
    tracing::debug!(
        path = %request.path,
        status = response.status,
        "unexpected response status"
    );
    Err(ClusteringError::Api {
        status: response.status,
        message,
    })
}
