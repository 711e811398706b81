//! Pagination types
//!
//! Accumulated state and the stop vocabulary shared by the accumulator,
//! the termination policy and the engine.

use crate::types::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a pagination run stopped requesting pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// At least `max_results` items were collected
    CapReached,
    /// The service returned an empty page
    Exhausted,
    /// The oldest collected item predates the window start
    WindowUnderrun,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CapReached => "cap reached",
            Self::Exhausted => "exhausted",
            Self::WindowUnderrun => "window underrun",
        };
        f.write_str(s)
    }
}

/// Result of checking the termination policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopResult {
    /// Fetch another page
    Continue,
    /// Stop pagination
    Stop(StopReason),
}

impl StopResult {
    /// Check if we should continue
    pub fn should_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// What an empty page means.
///
/// The service uses an empty page to signal the end of results, but a
/// transient glitch looks identical. `Tolerate` re-requests the same cursor
/// a bounded number of times before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum EmptyPagePolicy {
    /// The first empty page marks the results as exhausted
    #[default]
    Exhausted,
    /// Allow up to `max_consecutive` empty pages in a row
    Tolerate {
        /// Empty pages tolerated before marking exhausted
        max_consecutive: u32,
    },
}

/// Items collected so far in one pagination run.
///
/// Owned by exactly one run and mutated only through `ResultAccumulator`.
/// `items` only grows, `cursor` tracks the id of the last (oldest) item and
/// `exhausted` never flips back to false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulationState {
    /// Collected items, newest first
    pub(crate) items: Vec<Item>,
    /// Id of the oldest item seen so far
    pub(crate) cursor: Option<ItemId>,
    /// No further pages will be requested
    pub(crate) exhausted: bool,
    /// Empty pages seen since the last non-empty one
    pub(crate) empty_streak: u32,
}

impl AccumulationState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected items, newest first
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Current cursor
    pub fn cursor(&self) -> Option<ItemId> {
        self.cursor
    }

    /// Whether the service has run out of results
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of collected items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been collected yet
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The oldest collected item
    pub fn oldest(&self) -> Option<&Item> {
        self.items.last()
    }

    /// Hand the collected items to the caller
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}
