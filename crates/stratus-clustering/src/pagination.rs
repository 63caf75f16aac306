//! Page-by-page list driver
//!
//! A [`Pager`] asks the client for the first page of a list call and then
//! for each following page until the client reports none, a page comes back
//! empty, the consumer stops, or something fails. Every page is fully
//! decoded before the consumer sees it, so a bad element fails the walk
//! without handing over a partial page.

use crate::client::{check_status, send, ApiClient, ApiRequest};
use crate::error::Result;
use std::marker::PhantomData;
use stratus_results::{ApiVersion, ExtractConfig, Record, Response};

/// One decoded page of a list call
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    /// 1-based page number
    pub number: usize,
    /// Decoded elements in service order
    pub items: Vec<R>,
    /// API version the page was served at
    pub api_version: Option<ApiVersion>,
}

/// Lazily walks the pages of a list call
pub struct Pager<'c, C: ApiClient + ?Sized, R> {
    client: &'c C,
    request: ApiRequest,
    root: &'static str,
    _record: PhantomData<fn() -> R>,
}

impl<'c, C: ApiClient + ?Sized, R: Record> Pager<'c, C, R> {
    /// Create a pager whose pages wrap their elements in `root`
    pub fn new(client: &'c C, request: ApiRequest, root: &'static str) -> Self {
        Self {
            client,
            request,
            root,
            _record: PhantomData,
        }
    }

    /// The first-page request
    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Feed each page to `handler` until it returns `Ok(false)`.
    pub async fn each_page<F>(&self, mut handler: F) -> Result<()>
    where
        F: FnMut(Page<R>) -> Result<bool>,
    {
        let config = self.client.config();
        let mut current = send(self.client, &self.request).await?;
        let mut number = 0;

        loop {
            let items: Vec<R> = current.extract_slice_into(self.root)?;
            if items.is_empty() {
                tracing::debug!(
                    root = self.root,
                    pages = number,
                    "empty page, list finished"
                );
                return Ok(());
            }

            number += 1;
            tracing::debug!(
                root = self.root,
                page = number,
                items = items.len(),
                "page decoded"
            );
            let page = Page {
                number,
                items,
                api_version: page_version(&current, &config.extract),
            };
            if !handler(page)? {
                return Ok(());
            }

            match self.client.next_page(&self.request, &current).await? {
                Some(next) => current = check_status(&self.request, next)?,
                None => return Ok(()),
            }
        }
    }

    /// Collect the elements of every page
    pub async fn all_pages(&self) -> Result<Vec<R>> {
        let mut all = Vec::new();
        self.each_page(|page| {
            all.extend(page.items);
            Ok(true)
        })
        .await?;
        Ok(all)
    }
}

/// Version a page was served at; an unreadable header counts as absent.
fn page_version(response: &Response, config: &ExtractConfig) -> Option<ApiVersion> {
    match response.api_version(config) {
        Ok(version) => version,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable API version header on page");
            None
        }
    }
}
