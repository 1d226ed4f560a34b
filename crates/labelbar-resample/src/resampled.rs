//! Aggregated bar data structure.

use chrono::{DateTime, Utc};
use labelbar_types::Ohlc;
use serde::{Deserialize, Serialize};

/// A bar aggregated from a contiguous group of source bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResampledBar {
    /// Bucket start time.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// First available open in the bucket.
    pub open: f64,
    /// Highest high in the bucket.
    pub high: f64,
    /// Lowest low in the bucket.
    pub low: f64,
    /// Last available close in the bucket.
    pub close: f64,
    /// Sum of the known source volumes.
    pub volume: f64,
    /// Number of source bars in the bucket.
    pub bar_count: u32,
}

impl ResampledBar {
    /// Creates a new resampled bar.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        bar_count: u32,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            bar_count,
        }
    }
}

impl Ohlc for ResampledBar {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_bar() -> ResampledBar {
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 2, 12, 0, 0).unwrap();
        ResampledBar::new(timestamp, 2650.0, 2655.0, 2648.0, 2652.0, 300.0, 15)
    }

    #[test]
    fn test_ohlc_impl() {
        let bar = create_test_bar();
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
        assert!(bar.is_complete());
    }
}
