//! Date range with trading-session bounds.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::DateRangeError;

/// Hour (UTC) at which a trading day is considered to start.
///
/// A date `d` in a [`DateRange`] stands for the instant `d 06:00 UTC`.
pub const SESSION_CUTOFF_HOUR: u32 = 6;

/// An inclusive range of dates used to select bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a date range for a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Creates a range with no lower bound, keeping everything up to `end`.
    #[must_use]
    pub const fn until(end: NaiveDate) -> Self {
        Self {
            start: NaiveDate::MIN,
            end,
        }
    }

    /// Returns the first instant included by the range.
    #[must_use]
    pub fn session_start(&self) -> DateTime<Utc> {
        session_instant(self.start)
    }

    /// Returns the last instant included by the range.
    #[must_use]
    pub fn session_end(&self) -> DateTime<Utc> {
        session_instant(self.end)
    }

    /// Returns true if `instant` lies within the session bounds.
    #[must_use]
    pub fn contains_instant(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.session_start() && instant <= self.session_end()
    }
}

fn session_instant(date: NaiveDate) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(SESSION_CUTOFF_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(time))
}
