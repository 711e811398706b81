//! Page fetching module
//!
//! One network call per page. The `PageFetcher` trait is the only thing the
//! pagination engine needs from the outside world; `SearchClient` is the
//! HTTP implementation against the search endpoint.
//!
//! # Overview
//!
//! - `PageFetcher` - fetch one page given a query and cursor
//! - `SearchClient` - reqwest-backed fetcher with auth and rate limiting
//! - `PageDecoder` - normalizes the two response shapes into items
//! - `TimeoutFetcher` - bounds the latency of any fetcher

mod client;
mod decode;
mod types;

pub use client::{SearchClient, SearchEndpoint, DEFAULT_SEARCH_PATH};
pub use decode::{map_item, parse_created_at, PageDecoder, DEFAULT_RECORDS_FIELD};
pub use types::{PageFetcher, TimeoutFetcher};
