//! Pagination module
//!
//! Cursor-driven accumulation of search results, walking backward in time.
//!
//! # Overview
//!
//! The search service only accepts an upper date bound and a "give me
//! everything older than this id" cursor. This module holds the pieces that
//! decide what happens between two page fetches:
//!
//! - `ResultAccumulator` folds each page into an `AccumulationState` and
//!   advances the cursor
//! - `check_termination` decides whether another page is needed
//!
//! Both are synchronous and free of I/O; the async loop lives in `engine`.

mod accumulator;
mod policy;
mod types;

pub use accumulator::ResultAccumulator;
pub use policy::{check_termination, should_continue, trim_to_window};
pub use types::{AccumulationState, EmptyPagePolicy, StopReason, StopResult};
