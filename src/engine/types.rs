//! Engine types
//!
//! What a pagination run resolves to.

use crate::error::Error;
use crate::pagination::StopReason;
use crate::types::Item;
use serde::Serialize;
use std::fmt;

/// How a pagination run ended
#[derive(Debug)]
pub enum Completion {
    /// The termination policy stopped the run
    Finished(StopReason),
    /// A fetch failed; the items collected before it are kept
    Degraded {
        /// The transport failure that halted the run
        error: Error,
    },
    /// The shutdown signal fired before the next page arrived
    Cancelled,
}

impl Completion {
    /// Check if the run was halted by a fetch failure
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Check if the run was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The stop reason, for finished runs
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Self::Finished(reason) => Some(*reason),
            _ => None,
        }
    }

    /// The failure, for degraded runs
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Degraded { error } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished(reason) => write!(f, "finished ({reason})"),
            Self::Degraded { error } => write!(f, "degraded ({error})"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Statistics from a pagination run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Fetch calls that returned a page
    pub pages_fetched: usize,
    /// Items received across all pages
    pub items_received: usize,
    /// Pages that came back empty
    pub empty_pages: usize,
    /// Failed fetch calls
    pub errors: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SearchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page of `items` items
    pub fn add_page(&mut self, items: usize) {
        self.pages_fetched += 1;
        self.items_received += items;
        if items == 0 {
            self.empty_pages += 1;
        }
    }

    /// Record a failed fetch
    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    /// Total fetch calls made, successful or not
    pub fn calls(&self) -> usize {
        self.pages_fetched + self.errors
    }
}

/// Result of a pagination run
#[derive(Debug)]
pub struct SearchOutcome {
    /// Collected items, newest first
    pub items: Vec<Item>,
    /// How the run ended
    pub completion: Completion,
    /// Run statistics
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Number of items collected
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items were collected
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the outcome, keeping only the items
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}
