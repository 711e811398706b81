//! Window types

use crate::error::{Error, Result};
use crate::types::Query;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

/// A half-open range of days `[start, end_exclusive)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Window {
    /// First day of the window
    pub start: NaiveDate,
    /// Day after the last day of the window
    pub end_exclusive: NaiveDate,
}

impl Window {
    /// Create a window, rejecting empty or inverted ranges
    pub fn new(start: NaiveDate, end_exclusive: NaiveDate) -> Result<Self> {
        if start >= end_exclusive {
            return Err(Error::invalid_query(format!(
                "window start {start} is not before window end {end_exclusive}"
            )));
        }
        Ok(Self {
            start,
            end_exclusive,
        })
    }

    /// The window covering exactly one day
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end_exclusive: day + Duration::days(1),
        }
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end_exclusive - self.start).num_days()
    }

    /// Build a search query over this window
    pub fn to_query(&self, text: impl Into<String>, max_results: usize) -> Result<Query> {
        Query::new(text, self.start, self.end_exclusive, max_results)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end_exclusive)
    }
}
