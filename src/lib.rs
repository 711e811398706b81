// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tweetset
//!
//! Collects posts matching a search query within a date window from a
//! cursor-paginated search API.
//!
//! Each page is fetched with the id of the oldest post seen so far as the
//! cursor. Collection stops once enough posts are in hand, the service runs
//! out of results, or the results reach past the start of the window.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use tweetset::{fetch::SearchClient, config::SearchConfig, engine::search_items};
//!
//! #[tokio::main]
//! async fn main() -> tweetset::Result<()> {
//!     let config = SearchConfig::from_file("search.yaml")?;
//!     let client = SearchClient::from_config(&config)?;
//!
//!     let outcome = search_items(
//!         client,
//!         "$AAPL",
//!         NaiveDate::from_ymd_opt(2017, 3, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2017, 5, 3).unwrap(),
//!         200,
//!     )
//!     .await?;
//!
//!     println!("{} posts, {}", outcome.len(), outcome.completion);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       PaginationDriver                       │
//! │   fetch ─▶ ResultAccumulator::apply ─▶ check_termination     │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────┬───────────────────┐
//! │    Fetch     │           HTTP            │      Window       │
//! ├──────────────┼───────────────────────────┼───────────────────┤
//! │ SearchClient │ Rate limit (governor)     │ Day windows       │
//! │ PageDecoder  │ Bearer / app-only auth    │ Concurrent runs   │
//! │ Timeout      │ Status classification     │                   │
//! └──────────────┴───────────────────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Items, queries and pages
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Single-page fetchers
pub mod fetch;

/// Accumulation and termination
pub mod pagination;

/// Pagination loop
pub mod engine;

/// Date window generation
pub mod window;

/// Template interpolation
pub mod template;

/// Configuration loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::SearchConfig;
pub use engine::{
    search_items, search_windows, Completion, PaginationDriver, SearchOutcome, SearchStats,
};
pub use fetch::{PageFetcher, SearchClient};
pub use pagination::{EmptyPagePolicy, StopReason};
pub use window::{Window, WindowRouter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
