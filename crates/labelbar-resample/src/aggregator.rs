//! Streaming bar-to-bar aggregation.

use chrono::{DateTime, Utc};
use labelbar_types::{Bar, Interval};

use crate::ResampledBar;

/// Streaming bar aggregator.
///
/// Groups consecutive bars by the interval bucket their timestamp falls
/// into. Bars must arrive in ascending timestamp order. Every bucket that
/// received a bar is emitted, even if its aggregates are NaN; filtering
/// is left to [`Resampler`](crate::Resampler).
#[derive(Debug)]
pub struct BarAggregator {
    interval: Interval,
    current: Option<BucketBuilder>,
}

impl BarAggregator {
    /// Creates a new aggregator for the given interval.
    #[must_use]
    pub const fn new(interval: Interval) -> Self {
        Self {
            interval,
            current: None,
        }
    }

    /// Returns the interval being aggregated to.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Processes a bar, potentially emitting a completed bucket.
    ///
    /// Returns `Some(bar)` when this bar starts a new bucket and the
    /// previous one is therefore complete, `None` otherwise.
    pub fn process(&mut self, bar: &Bar) -> Option<ResampledBar> {
        let bucket_start = self.interval.bucket_start(bar.timestamp);

        match self.current.take() {
            Some(mut builder) if builder.timestamp == bucket_start => {
                builder.update(bar);
                self.current = Some(builder);
                None
            }
            Some(builder) => {
                self.current = Some(BucketBuilder::new(bucket_start, bar));
                Some(builder.finish())
            }
            None => {
                self.current = Some(BucketBuilder::new(bucket_start, bar));
                None
            }
        }
    }

    /// Finishes aggregation, returning any remaining bucket.
    #[must_use]
    pub fn finish(self) -> Option<ResampledBar> {
        self.current.map(BucketBuilder::finish)
    }
}

/// Accumulates one bucket.
///
/// NaN prices are skipped: open is the first finite open, close the last
/// finite close, high and low the extremes of the finite values. A field
/// with no finite input stays NaN.
#[derive(Debug)]
struct BucketBuilder {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    bar_count: u32,
}

impl BucketBuilder {
    fn new(timestamp: DateTime<Utc>, bar: &Bar) -> Self {
        let mut builder = Self {
            timestamp,
            open: f64::NAN,
            high: f64::NAN,
            low: f64::NAN,
            close: f64::NAN,
            volume: 0.0,
            bar_count: 0,
        };
        builder.update(bar);
        builder
    }

    fn update(&mut self, bar: &Bar) {
        if self.open.is_nan() && bar.open.is_finite() {
            self.open = bar.open;
        }
        if bar.high.is_finite() {
            // f64::max ignores a NaN operand.
            self.high = self.high.max(bar.high);
        }
        if bar.low.is_finite() {
            self.low = self.low.min(bar.low);
        }
        if bar.close.is_finite() {
            self.close = bar.close;
        }
        if let Some(volume) = bar.volume.filter(|v| v.is_finite()) {
            self.volume += volume;
        }
        self.bar_count += 1;
    }

    const fn finish(self) -> ResampledBar {
        ResampledBar::new(
            self.timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.bar_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn make_bar(hour: u32, minute: u32, open: f64, high: f64, low: f64, close: f64) -> Bar {
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 2, hour, minute, 0).unwrap();
        Bar::new(timestamp, open, high, low, close).with_volume(10.0)
    }

    #[test]
    fn test_fifteen_minute_aggregation() {
        let mut agg = BarAggregator::new(Interval::MINUTE_15);

        assert!(agg.process(&make_bar(12, 0, 10.0, 11.0, 9.5, 10.5)).is_none());
        assert!(agg.process(&make_bar(12, 7, 10.5, 12.0, 10.0, 11.5)).is_none());
        assert!(agg.process(&make_bar(12, 14, 11.5, 11.8, 9.0, 9.2)).is_none());

        let bar = agg.process(&make_bar(12, 15, 9.2, 9.4, 9.1, 9.3)).unwrap();
        assert_eq!(bar.bar_count, 3);
        assert_eq!(bar.timestamp.minute(), 0);
        assert!((bar.open - 10.0).abs() < 1e-10);
        assert!((bar.high - 12.0).abs() < 1e-10);
        assert!((bar.low - 9.0).abs() < 1e-10);
        assert!((bar.close - 9.2).abs() < 1e-10);
        assert!((bar.volume - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_finish() {
        let mut agg = BarAggregator::new(Interval::HOUR_1);
        agg.process(&make_bar(12, 0, 1.0, 1.0, 1.0, 1.0));

        let bar = agg.finish().unwrap();
        assert_eq!(bar.bar_count, 1);
        assert_eq!(bar.timestamp.hour(), 12);
    }

    #[test]
    fn test_gap_skips_empty_buckets() {
        let mut agg = BarAggregator::new(Interval::MINUTE_15);
        agg.process(&make_bar(12, 0, 1.0, 1.0, 1.0, 1.0));

        let bar = agg.process(&make_bar(13, 5, 2.0, 2.0, 2.0, 2.0)).unwrap();
        assert_eq!(bar.timestamp.hour(), 12);
        let last = agg.finish().unwrap();
        assert_eq!((last.timestamp.hour(), last.timestamp.minute()), (13, 0));
    }

    #[test]
    fn test_nan_prices_are_skipped() {
        let mut agg = BarAggregator::new(Interval::MINUTE_15);
        agg.process(&make_bar(12, 0, f64::NAN, 5.0, f64::NAN, 4.0));
        agg.process(&make_bar(12, 1, 4.0, f64::NAN, 3.0, f64::NAN));

        let bar = agg.finish().unwrap();
        assert!((bar.open - 4.0).abs() < 1e-10);
        assert!((bar.high - 5.0).abs() < 1e-10);
        assert!((bar.low - 3.0).abs() < 1e-10);
        assert!((bar.close - 4.0).abs() < 1e-10);
        assert_eq!(bar.bar_count, 2);
    }

    #[test]
    fn test_all_nan_field_stays_nan() {
        let mut agg = BarAggregator::new(Interval::MINUTE_15);
        agg.process(&make_bar(12, 0, 1.0, f64::NAN, 1.0, 1.0));
        assert!(agg.finish().unwrap().high.is_nan());
    }
}
