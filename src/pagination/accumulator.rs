//! Result accumulator
//!
//! Folds fetched pages into the accumulated state.

use super::types::{AccumulationState, EmptyPagePolicy};
use crate::types::Page;
use tracing::debug;

/// Applies pages to an `AccumulationState`.
///
/// Pages must arrive newest-first with decreasing cursors; under that
/// condition appending keeps the whole collection newest-first. Ids are not
/// deduplicated, a service repeating an id across pages will produce
/// duplicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAccumulator {
    empty_page: EmptyPagePolicy,
}

impl ResultAccumulator {
    /// Create an accumulator with the default empty-page policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator with the given empty-page policy
    pub fn with_policy(empty_page: EmptyPagePolicy) -> Self {
        Self { empty_page }
    }

    /// The configured empty-page policy
    pub fn policy(&self) -> EmptyPagePolicy {
        self.empty_page
    }

    /// Apply one fetched page
    pub fn apply(&self, state: &mut AccumulationState, page: Page) {
        let Some(last) = page.last() else {
            state.empty_streak = state.empty_streak.saturating_add(1);
            match self.empty_page {
                EmptyPagePolicy::Exhausted => state.exhausted = true,
                EmptyPagePolicy::Tolerate { max_consecutive } => {
                    if state.empty_streak > max_consecutive {
                        state.exhausted = true;
                    } else {
                        debug!(
                            streak = state.empty_streak,
                            max_consecutive, "Empty page tolerated, retrying same cursor"
                        );
                    }
                }
            }
            return;
        };

        state.cursor = Some(last.id);
        state.empty_streak = 0;
        state.items.extend(page);
    }
}
