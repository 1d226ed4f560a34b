//! Batch resampling with a bucket completeness policy.

use labelbar_types::{Bar, ConfigError, Interval, Ohlc, PriceSeries};

use crate::{BarAggregator, ResampledBar};

/// Rule deciding which aggregated buckets are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completeness {
    /// Keep a bucket only if it holds exactly `interval / source_interval`
    /// source bars and all four aggregates are finite.
    #[default]
    Full,
    /// Keep every bucket whose four aggregates are finite, however many
    /// source bars it holds.
    NonEmpty,
}

/// Resamples bars from a source interval to a coarser interval.
#[derive(Debug, Clone, Copy)]
pub struct Resampler {
    interval: Interval,
    expected_bars: u32,
    completeness: Completeness,
}

impl Resampler {
    /// Creates a resampler for 1-minute source bars.
    #[must_use]
    pub const fn new(interval: Interval) -> Self {
        Self {
            interval,
            expected_bars: interval.minutes(),
            completeness: Completeness::Full,
        }
    }

    /// Sets the interval of the source bars.
    ///
    /// # Errors
    ///
    /// Returns an error if the output interval is not a whole multiple of
    /// `source`.
    pub fn with_source_interval(mut self, source: Interval) -> Result<Self, ConfigError> {
        match self.interval.bars_per(source) {
            Some(expected) => {
                self.expected_bars = expected;
                Ok(self)
            }
            None => Err(ConfigError::IncompatibleIntervals {
                target: self.interval,
                finer: source,
            }),
        }
    }

    /// Sets the completeness policy.
    #[must_use]
    pub const fn with_completeness(mut self, completeness: Completeness) -> Self {
        self.completeness = completeness;
        self
    }

    /// Returns the output interval.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the number of source bars a full bucket holds.
    #[must_use]
    pub const fn expected_bars(&self) -> u32 {
        self.expected_bars
    }

    /// Resamples `bars`, which must be in ascending timestamp order.
    #[must_use]
    pub fn resample(&self, bars: &[Bar]) -> Vec<ResampledBar> {
        let mut aggregator = BarAggregator::new(self.interval);
        let mut buckets = Vec::with_capacity(bars.len() / self.expected_bars.max(1) as usize + 1);

        for bar in bars {
            if let Some(bucket) = aggregator.process(bar) {
                buckets.push(bucket);
            }
        }
        if let Some(bucket) = aggregator.finish() {
            buckets.push(bucket);
        }

        let total = buckets.len();
        buckets.retain(|b| self.keeps(b));
        tracing::debug!(
            interval = %self.interval,
            source_bars = bars.len(),
            buckets = total,
            dropped = total - buckets.len(),
            "resampled bars"
        );
        buckets
    }

    fn keeps(&self, bucket: &ResampledBar) -> bool {
        if !bucket.is_complete() {
            return false;
        }
        match self.completeness {
            Completeness::Full => bucket.bar_count == self.expected_bars,
            Completeness::NonEmpty => bucket.bar_count > 0,
        }
    }
}

/// Resamples 1-minute bars to `interval`, keeping only full buckets.
#[must_use]
pub fn resample(series: &PriceSeries, interval: Interval) -> Vec<ResampledBar> {
    Resampler::new(interval).resample(series.bars())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{DateTime, TimeDelta, TimeZone, Timelike, Utc};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap()
    }

    /// One-minute bars whose prices are derived from the minute index.
    fn minute_bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64;
                // Odd minutes spike, even minutes dip.
                let (high, low) = if i % 2 == 1 {
                    (base + 5.0, base - 1.0)
                } else {
                    (base + 1.0, base - 3.0)
                };
                Bar::new(start() + TimeDelta::minutes(i as i64), base, high, low, base + 0.5)
            })
            .collect()
    }

    #[test]
    fn test_thirty_minutes_into_two_buckets() {
        let bars = minute_bars(30);
        let out = resample(&PriceSeries::new(bars.clone()), Interval::MINUTE_15);

        assert_eq!(out.len(), 2);
        for (k, bucket) in out.iter().enumerate() {
            let group = &bars[k * 15..(k + 1) * 15];
            let high = group.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let low = group.iter().map(|b| b.low).fold(f64::MAX, f64::min);

            assert_eq!(bucket.timestamp, start() + TimeDelta::minutes(15 * k as i64));
            assert_eq!(bucket.bar_count, 15);
            assert_abs_diff_eq!(bucket.open, group[0].open);
            assert_abs_diff_eq!(bucket.high, high);
            assert_abs_diff_eq!(bucket.low, low);
            assert_abs_diff_eq!(bucket.close, group[14].close);
        }
        // Spot-check the first bucket by hand: minutes 0..=14.
        assert_abs_diff_eq!(out[0].open, 100.0);
        assert_abs_diff_eq!(out[0].high, 118.0);
        assert_abs_diff_eq!(out[0].low, 97.0);
        assert_abs_diff_eq!(out[0].close, 114.5);
    }

    #[test]
    fn test_incomplete_trailing_bucket_dropped() {
        let out = Resampler::new(Interval::MINUTE_15).resample(&minute_bars(35));
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].timestamp.minute(), 15);
    }

    #[test]
    fn test_non_empty_policy_keeps_partial_bucket() {
        let out = Resampler::new(Interval::MINUTE_15)
            .with_completeness(Completeness::NonEmpty)
            .resample(&minute_bars(35));
        assert_eq!(out.len(), 3);
        assert_eq!(out[2].bar_count, 5);
    }

    #[test]
    fn test_nan_aggregate_dropped_under_both_policies() {
        let mut bars = minute_bars(15);
        for bar in &mut bars {
            bar.low = f64::NAN;
        }
        assert!(Resampler::new(Interval::MINUTE_15).resample(&bars).is_empty());
        assert!(
            Resampler::new(Interval::MINUTE_15)
                .with_completeness(Completeness::NonEmpty)
                .resample(&bars)
                .is_empty()
        );
    }

    #[test]
    fn test_source_interval() {
        let resampler = Resampler::new(Interval::HOUR_1)
            .with_source_interval(Interval::MINUTE_15)
            .unwrap();
        assert_eq!(resampler.expected_bars(), 4);

        let bad = Resampler::new(Interval::MINUTE_15).with_source_interval(Interval::MINUTE_30);
        assert!(matches!(bad, Err(ConfigError::IncompatibleIntervals { .. })));
    }

    #[test]
    fn test_empty_input() {
        assert!(Resampler::new(Interval::MINUTE_15).resample(&[]).is_empty());
    }
}
