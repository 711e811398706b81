//! Date window generation
//!
//! Splits a date range into consecutive search windows, e.g. one window per
//! day for the last week.
//!
//! # Overview
//!
//! - `Window` - a half-open range of days
//! - `WindowRouter` - slices a range into stepped windows
//! - `parse_date` / `parse_step` - parse command line values

mod types;

pub use types::Window;

use crate::error::{Error, Result};
use chrono::{DateTime, Days, Duration, NaiveDate, Utc};

/// Slices `[start, end_exclusive)` into windows `step` long.
///
/// The last window is shortened when the range is not a whole number of
/// steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRouter {
    start: NaiveDate,
    end_exclusive: NaiveDate,
    step: Duration,
}

impl WindowRouter {
    /// Create a router over `[start, end_exclusive)`
    pub fn new(start: NaiveDate, end_exclusive: NaiveDate, step: Duration) -> Result<Self> {
        if step < Duration::days(1) {
            return Err(Error::config(format!(
                "window step must be at least one day, got {} days",
                step.num_days()
            )));
        }
        // Validates the range
        Window::new(start, end_exclusive)?;

        Ok(Self {
            start,
            end_exclusive,
            step,
        })
    }

    /// Windows `step` long covering the `days` days before `end_exclusive`
    pub fn trailing(end_exclusive: NaiveDate, days: u32, step: Duration) -> Result<Self> {
        if days == 0 {
            return Err(Error::config("number of days must be positive"));
        }
        let start = end_exclusive
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| {
                Error::config(format!("{days} days before {end_exclusive} is out of range"))
            })?;
        Self::new(start, end_exclusive, step)
    }

    /// Create from command line values; `end` may be `today`
    pub fn from_strings(start: &str, end: &str, step: &str) -> Result<Self> {
        let start = parse_date(start)?;
        let end = if end.eq_ignore_ascii_case("today") {
            today()
        } else {
            parse_date(end)?
        };
        Self::new(start, end, parse_step(step)?)
    }

    /// The windows, oldest first
    pub fn windows(&self) -> Vec<Window> {
        let mut windows = Vec::new();
        let mut current = self.start;

        while current < self.end_exclusive {
            // Past the last representable date means past the range end
            let next = current
                .checked_add_signed(self.step)
                .map_or(self.end_exclusive, |next| next.min(self.end_exclusive));
            windows.push(Window {
                start: current,
                end_exclusive: next,
            });
            current = next;
        }

        windows
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a calendar date (`2017-03-01`, `2017/03/01` or an RFC 3339 instant)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| Error::invalid_date(s, "expected YYYY-MM-DD"))
}

/// Parse a window step like `1d` or `2w` (bare numbers are days)
pub fn parse_step(s: &str) -> Result<Duration> {
    let s = s.trim();

    let (num_str, unit_days) = if let Some(stripped) = s.strip_suffix('w') {
        (stripped, 7)
    } else if let Some(stripped) = s.strip_suffix('d') {
        (stripped, 1)
    } else {
        (s, 1)
    };

    let num: i64 = num_str
        .parse()
        .map_err(|_| Error::config(format!("Invalid window step: {s}")))?;
    if num <= 0 {
        return Err(Error::config(format!("Window step must be positive: {s}")));
    }

    num.checked_mul(unit_days)
        .and_then(Duration::try_days)
        .ok_or_else(|| Error::config(format!("Window step is too large: {s}")))
}

#[cfg(test)]
mod tests;
