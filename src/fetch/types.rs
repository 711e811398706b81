//! Fetcher trait and wrappers

use crate::error::{Error, Result};
use crate::types::{ItemId, Page, Query};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Fetches a single page of search results.
///
/// Implementations issue exactly one request per call and return items
/// newest-first. An empty page means there is nothing older; a failed
/// request must be reported as `Err`, never as an empty page.
///
/// A fetch may be cancelled by dropping its future. The engine only ever
/// does this before the page is applied, so cancellation never leaves the
/// accumulated state half-updated.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page of results older than `cursor` (or the newest page
    /// when `cursor` is `None`)
    async fn fetch(&self, query: &Query, cursor: Option<ItemId>) -> Result<Page>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Arc<F> {
    async fn fetch(&self, query: &Query, cursor: Option<ItemId>) -> Result<Page> {
        (**self).fetch(query, cursor).await
    }
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Box<F> {
    async fn fetch(&self, query: &Query, cursor: Option<ItemId>) -> Result<Page> {
        (**self).fetch(query, cursor).await
    }
}

/// Wraps a fetcher with a per-call deadline.
///
/// An expired deadline is reported as `Error::Timeout`, which ends the run
/// like any other transport failure.
#[derive(Debug, Clone)]
pub struct TimeoutFetcher<F> {
    inner: F,
    timeout: Duration,
}

impl<F> TimeoutFetcher<F> {
    /// Wrap `inner` so each fetch fails after `timeout`
    pub fn new(inner: F, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for TimeoutFetcher<F> {
    async fn fetch(&self, query: &Query, cursor: Option<ItemId>) -> Result<Page> {
        match tokio::time::timeout(self.timeout, self.inner.fetch(query, cursor)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}
