//! Common types used throughout tweetset
//!
//! The query a caller asks for, the items the search service returns, and
//! the page they arrive in.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Number of items requested per page (the service maximum)
pub const PAGE_SIZE: usize = 100;

// ============================================================================
// Item
// ============================================================================

/// Identifier of a post, also used as the pagination cursor.
///
/// Ids are assigned in increasing order over time, so a smaller id is an
/// older post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// The id just below this one, used when the service treats the
    /// cursor inclusively
    pub fn predecessor(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single post, reduced to the fields callers need
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Post id
    pub id: ItemId,
    /// When the post was created
    pub created_at: DateTime<Utc>,
    /// Post body
    pub text: String,
}

impl Item {
    /// Create a new item
    pub fn new(id: impl Into<ItemId>, created_at: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at,
            text: text.into(),
        }
    }
}

/// One page of results, newest first. An empty page means the service has
/// nothing older to return.
pub type Page = Vec<Item>;

// ============================================================================
// Query
// ============================================================================

/// A search over the half-open window `[window_start, window_end_exclusive)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Search text (e.g. `$AAPL`)
    pub text: String,
    /// Earliest day of interest
    pub window_start: NaiveDate,
    /// Day after the latest day of interest
    pub window_end_exclusive: NaiveDate,
    /// Stop once at least this many items are collected
    pub max_results: usize,
}

impl Query {
    /// Create a validated query
    pub fn new(
        text: impl Into<String>,
        window_start: NaiveDate,
        window_end_exclusive: NaiveDate,
        max_results: usize,
    ) -> Result<Self> {
        let query = Self {
            text: text.into(),
            window_start,
            window_end_exclusive,
            max_results,
        };
        query.validate()?;
        Ok(query)
    }

    /// Check the query before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::invalid_query("query text is empty"));
        }
        if self.max_results == 0 {
            return Err(Error::invalid_query("max_results must be positive"));
        }
        if self.window_start >= self.window_end_exclusive {
            return Err(Error::invalid_query(format!(
                "window start {} is not before window end {}",
                self.window_start, self.window_end_exclusive
            )));
        }
        Ok(())
    }

    /// Start of the window as an instant (midnight UTC)
    pub fn window_start_at(&self) -> DateTime<Utc> {
        self.window_start.and_time(NaiveTime::MIN).and_utc()
    }

    /// End of the window as an instant (midnight UTC, exclusive)
    pub fn window_end_at(&self) -> DateTime<Utc> {
        self.window_end_exclusive.and_time(NaiveTime::MIN).and_utc()
    }

    /// Whether an instant falls inside the window
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.window_start_at() && at < self.window_end_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_query_new_valid() {
        let query = Query::new("$AAPL", date("2017-03-01"), date("2017-05-03"), 200).unwrap();
        assert_eq!(query.text, "$AAPL");
        assert_eq!(query.max_results, 200);
    }

    #[test]
    fn test_query_rejects_zero_max_results() {
        let err = Query::new("$AAPL", date("2017-03-01"), date("2017-05-03"), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { .. }));
    }

    #[test]
    fn test_query_rejects_blank_text() {
        let err = Query::new("   ", date("2017-03-01"), date("2017-05-03"), 10).unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { .. }));
    }

    #[test]
    fn test_query_rejects_empty_window() {
        assert!(Query::new("$AAPL", date("2017-03-01"), date("2017-03-01"), 10).is_err());
        assert!(Query::new("$AAPL", date("2017-03-02"), date("2017-03-01"), 10).is_err());
    }

    #[test]
    fn test_query_window_bounds() {
        let query = Query::new("$AAPL", date("2017-03-01"), date("2017-03-02"), 10).unwrap();
        let start = Utc.with_ymd_and_hms(2017, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2017, 3, 2, 0, 0, 0).unwrap();

        assert_eq!(query.window_start_at(), start);
        assert_eq!(query.window_end_at(), end);
        assert!(query.contains(start));
        assert!(!query.contains(end));
        assert!(!query.contains(start - chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_item_id_ordering_and_predecessor() {
        assert!(ItemId(10) < ItemId(11));
        assert_eq!(ItemId(10).predecessor(), ItemId(9));
        assert_eq!(ItemId(0).predecessor(), ItemId(0));
        assert_eq!(ItemId(852_421_563_400_159_233).to_string(), "852421563400159233");
    }

    #[test]
    fn test_item_serde() {
        let item = Item::new(42, Utc.with_ymd_and_hms(2017, 3, 1, 12, 0, 0).unwrap(), "hi");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["text"], "hi");

        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
