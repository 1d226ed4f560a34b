//! Download window selection.

use chrono::{DateTime, TimeDelta, Utc};

/// Days re-fetched before the last known bar.
pub const LOOKBACK_DAYS: i64 = 5;

/// Time span requested from the chart snapshot endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// First minute requested.
    pub start: DateTime<Utc>,
    /// Last minute requested.
    pub end: DateTime<Utc>,
}

impl FetchWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The window after `last_known`: it starts [`LOOKBACK_DAYS`] before
    /// the last known bar (or before `now` when nothing is known) and ends
    /// one minute before `now`, so the still-forming bar is never fetched.
    #[must_use]
    pub fn since(last_known: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let anchor = last_known.unwrap_or(now);
        Self {
            start: anchor - TimeDelta::days(LOOKBACK_DAYS),
            end: now - TimeDelta::minutes(1),
        }
    }

    /// Returns true if the window covers no time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 30).unwrap()
    }

    #[test]
    fn test_window_without_history() {
        let window = FetchWindow::since(None, now());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 30).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 1, 10, 11, 59, 30).unwrap());
        assert!(!window.is_empty());
    }

    #[test]
    fn test_window_after_last_bar() {
        let last = Utc.with_ymd_and_hms(2025, 1, 9, 21, 59, 0).unwrap();
        let window = FetchWindow::since(Some(last), now());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 1, 4, 21, 59, 0).unwrap());
    }
}
