//! Execution engine module
//!
//! The pagination loop: fetch a page, fold it into the accumulated state,
//! ask the termination policy whether to go on.
//!
//! # Overview
//!
//! The engine module provides:
//! - `PaginationDriver` - runs one query to completion over a `PageFetcher`
//! - `SearchOutcome` - collected items plus how the run ended
//! - `search_items` / `search_windows` - entry points for one or many windows

mod types;

pub use types::{Completion, SearchOutcome, SearchStats};

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::pagination::{
    check_termination, AccumulationState, EmptyPagePolicy, ResultAccumulator, StopResult,
};
use crate::types::Query;
use crate::window::Window;
use chrono::NaiveDate;
use futures::future::join_all;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives a `PageFetcher` until the termination policy says stop.
///
/// One fetch is in flight at a time and every run owns its own state, so a
/// single driver can serve any number of concurrent runs.
pub struct PaginationDriver<F> {
    fetcher: F,
    accumulator: ResultAccumulator,
}

impl<F: PageFetcher> PaginationDriver<F> {
    /// Create a driver with the default empty-page policy
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            accumulator: ResultAccumulator::new(),
        }
    }

    /// Set the empty-page policy
    #[must_use]
    pub fn with_policy(mut self, policy: EmptyPagePolicy) -> Self {
        self.accumulator = ResultAccumulator::with_policy(policy);
        self
    }

    /// Get the fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run a query to completion.
    ///
    /// Fails only when the query is invalid, before any fetch. A fetch
    /// failure ends the run with `Completion::Degraded` and the items
    /// collected so far.
    pub async fn run(&self, query: &Query) -> Result<SearchOutcome> {
        self.run_until(query, std::future::pending()).await
    }

    /// Run a query until it completes or `shutdown` resolves.
    ///
    /// Shutdown is only observed while waiting for a page, so a page that
    /// has arrived is always applied in full.
    pub async fn run_until<S>(&self, query: &Query, shutdown: S) -> Result<SearchOutcome>
    where
        S: Future<Output = ()>,
    {
        query.validate()?;

        let start = Instant::now();
        let mut state = AccumulationState::new();
        let mut stats = SearchStats::new();
        tokio::pin!(shutdown);

        let completion = loop {
            let cursor = state.cursor();
            let fetched = tokio::select! {
                biased;
                () = &mut shutdown => break Completion::Cancelled,
                fetched = self.fetcher.fetch(query, cursor) => fetched,
            };

            let page = match fetched {
                Ok(page) => page,
                Err(error) => {
                    stats.add_error();
                    warn!(
                        query = %query.text,
                        cursor = ?cursor,
                        collected = state.len(),
                        error = %error,
                        "Fetch failed, returning partial results"
                    );
                    break Completion::Degraded { error };
                }
            };

            stats.add_page(page.len());
            debug!(
                query = %query.text,
                page = stats.pages_fetched,
                items = page.len(),
                "Applying page"
            );
            self.accumulator.apply(&mut state, page);

            if let StopResult::Stop(reason) = check_termination(&state, query) {
                break Completion::Finished(reason);
            }
        };

        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            query = %query.text,
            window_start = %query.window_start,
            window_end = %query.window_end_exclusive,
            items = state.len(),
            pages = stats.pages_fetched,
            requests = stats.calls(),
            completion = %completion,
            "Search finished"
        );

        Ok(SearchOutcome {
            items: state.into_items(),
            completion,
            stats,
        })
    }
}

/// Collect items matching `text` in `[window_start, window_end_exclusive)`.
///
/// Stops once at least `max_results` items are collected, the service runs
/// out of results, or the results reach past `window_start`.
pub async fn search_items<F: PageFetcher>(
    fetcher: F,
    text: &str,
    window_start: NaiveDate,
    window_end_exclusive: NaiveDate,
    max_results: usize,
) -> Result<SearchOutcome> {
    let query = Query::new(text, window_start, window_end_exclusive, max_results)?;
    PaginationDriver::new(fetcher).run(&query).await
}

/// Outcome of one window in a multi-window search
#[derive(Debug)]
pub struct WindowOutcome {
    /// The searched window
    pub window: Window,
    /// The run result for that window
    pub result: Result<SearchOutcome>,
}

/// Search several windows concurrently, one independent run per window.
///
/// Results come back in the order of `windows`.
pub async fn search_windows<F: PageFetcher>(
    driver: &PaginationDriver<F>,
    text: &str,
    windows: &[Window],
    max_results: usize,
) -> Vec<WindowOutcome> {
    let runs = windows.iter().map(|window| async move {
        let result = match window.to_query(text, max_results) {
            Ok(query) => driver.run(&query).await,
            Err(e) => Err(e),
        };
        WindowOutcome {
            window: *window,
            result,
        }
    });

    join_all(runs).await
}
