//! HTTP search fetcher
//!
//! Builds one search request per page: the query text, the window's upper
//! bound (`until`), the fixed page size and, after the first page, the
//! `max_id` cursor.

use super::decode::{PageDecoder, DEFAULT_RECORDS_FIELD};
use super::types::PageFetcher;
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{ItemId, Page, Query, PAGE_SIZE};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Default search path relative to the base URL
pub const DEFAULT_SEARCH_PATH: &str = "/search/tweets.json";

/// Where and how to call the search endpoint
#[derive(Debug, Clone)]
pub struct SearchEndpoint {
    /// Search path (relative to the client's base URL, or absolute)
    pub path: String,
    /// Envelope field holding the posts
    pub records_field: String,
    /// The service returns the `max_id` post itself; request one below the
    /// cursor so pages do not overlap
    pub max_id_inclusive: bool,
    /// `result_type` parameter; `recent` keeps pages in time order
    pub result_type: Option<String>,
    /// Additional fixed query parameters (e.g. `lang`, `tweet_mode`)
    pub extra_params: BTreeMap<String, String>,
}

impl Default for SearchEndpoint {
    fn default() -> Self {
        Self {
            path: DEFAULT_SEARCH_PATH.to_string(),
            records_field: DEFAULT_RECORDS_FIELD.to_string(),
            max_id_inclusive: true,
            result_type: Some("recent".to_string()),
            extra_params: BTreeMap::new(),
        }
    }
}

/// Page fetcher backed by the HTTP search endpoint
#[derive(Debug)]
pub struct SearchClient {
    http: HttpClient,
    endpoint: SearchEndpoint,
    decoder: PageDecoder,
}

impl SearchClient {
    /// Create a fetcher over an existing HTTP client
    pub fn new(http: HttpClient, endpoint: SearchEndpoint) -> Self {
        let decoder = PageDecoder::new(endpoint.records_field.clone());
        Self {
            http,
            endpoint,
            decoder,
        }
    }

    /// Build the HTTP client, authenticator and endpoint from configuration
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_client_config(), config.credentials.clone())?;
        Ok(Self::new(http, config.endpoint()))
    }

    /// The endpoint settings
    pub fn endpoint(&self) -> &SearchEndpoint {
        &self.endpoint
    }

    /// Query parameters for one page request
    pub fn request_for(&self, query: &Query, cursor: Option<ItemId>) -> RequestConfig {
        let mut req = RequestConfig::new()
            .query("q", query.text.as_str())
            .query(
                "until",
                query.window_end_exclusive.format("%Y-%m-%d").to_string(),
            )
            .query("count", PAGE_SIZE.to_string());

        if let Some(cursor) = cursor {
            let max_id = if self.endpoint.max_id_inclusive {
                cursor.predecessor()
            } else {
                cursor
            };
            req = req.query("max_id", max_id.to_string());
        }

        if let Some(result_type) = &self.endpoint.result_type {
            req = req.query("result_type", result_type.as_str());
        }

        for (key, value) in &self.endpoint.extra_params {
            req = req.query(key.as_str(), value.as_str());
        }

        req
    }
}

#[async_trait]
impl PageFetcher for SearchClient {
    async fn fetch(&self, query: &Query, cursor: Option<ItemId>) -> Result<Page> {
        let req = self.request_for(query, cursor);
        let response = self.http.get_with_config(&self.endpoint.path, req).await?;

        let body_text = response
            .text()
            .await
            .map_err(|e| Error::decode(format!("Failed to read response body: {e}")))?;
        let body: Value = serde_json::from_str(&body_text)
            .map_err(|e| Error::decode(format!("Response is not JSON: {e}")))?;

        let page = self.decoder.decode(&body)?;
        debug!(
            query = %query.text,
            cursor = ?cursor,
            items = page.len(),
            "Fetched search page"
        );
        Ok(page)
    }
}
