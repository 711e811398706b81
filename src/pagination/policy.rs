//! Termination policy
//!
//! Three independent reasons to stop; pagination continues only while none
//! of them holds.

use super::types::{AccumulationState, StopReason, StopResult};
use crate::types::{Item, Query};

/// Decide whether another page should be fetched.
///
/// Conditions are checked in order (cap, exhaustion, window underrun) and
/// the first that holds is reported. The underrun check looks at the oldest
/// collected item only, so it can only fire after a page that reaches past
/// the window start has already been kept.
pub fn check_termination(state: &AccumulationState, query: &Query) -> StopResult {
    if state.len() >= query.max_results {
        return StopResult::Stop(StopReason::CapReached);
    }

    if state.is_exhausted() {
        return StopResult::Stop(StopReason::Exhausted);
    }

    if let Some(oldest) = state.oldest() {
        if oldest.created_at < query.window_start_at() {
            return StopResult::Stop(StopReason::WindowUnderrun);
        }
    }

    StopResult::Continue
}

/// Shorthand for `check_termination(..).should_continue()`
pub fn should_continue(state: &AccumulationState, query: &Query) -> bool {
    check_termination(state, query).should_continue()
}

/// Drop items outside the query window.
///
/// Runs that stop on a window underrun keep the overshooting page; callers
/// needing a hard cutoff filter with this.
pub fn trim_to_window(items: Vec<Item>, query: &Query) -> Vec<Item> {
    items
        .into_iter()
        .filter(|item| query.contains(item.created_at))
        .collect()
}
