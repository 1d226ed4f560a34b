//! Label pass over a price series.

use labelbar_types::{Bar, ConfigError, Direction, LabelConfig, PriceSeries};
use serde::Serialize;

use crate::{LabelReport, TargetStats, first_touch, regime, rolling_slopes, trend};

/// Label columns for one price series, one cell per bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    /// First-touch barrier label.
    pub touch: Vec<Option<Direction>>,
    /// Close-to-close trend label.
    pub trend: Vec<Option<Direction>>,
    /// Forward regression slope.
    pub slope: Vec<Option<f64>>,
    /// Regime label derived from the slope.
    pub regime: Vec<Option<Direction>>,
}

impl LabelSet {
    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.touch.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.touch.is_empty()
    }

    /// Computes distribution and run-length statistics for every column.
    #[must_use]
    pub fn report(&self) -> LabelReport {
        LabelReport {
            touch: TargetStats::of(&self.touch),
            trend: TargetStats::of(&self.trend),
            regime: TargetStats::of(&self.regime),
        }
    }

    /// Joins the labels back onto the bars they were computed from.
    ///
    /// Rows are paired by position; extra bars or labels are dropped.
    #[must_use]
    pub fn labeled_bars(&self, bars: &[Bar]) -> Vec<LabeledBar> {
        bars.iter()
            .enumerate()
            .take(self.len())
            .map(|(i, bar)| LabeledBar {
                bar: *bar,
                target_touch: self.touch[i],
                target_trend: self.trend[i],
                slope: self.slope[i],
                target_regime: self.regime[i],
            })
            .collect()
    }
}

/// A bar together with its label cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabeledBar {
    /// The source bar.
    #[serde(flatten)]
    pub bar: Bar,
    /// First-touch label.
    pub target_touch: Option<Direction>,
    /// Trend label.
    pub target_trend: Option<Direction>,
    /// Forward regression slope.
    pub slope: Option<f64>,
    /// Regime label.
    pub target_regime: Option<Direction>,
}

/// Computes forward-looking labels with a fixed configuration.
///
/// The engine holds no state between calls; running it twice on the
/// same series gives identical output.
#[derive(Debug, Clone, Copy)]
pub struct LabelEngine {
    config: LabelConfig,
}

impl LabelEngine {
    /// Creates an engine after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot produce labels.
    pub fn new(config: LabelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Computes every label column for `series`.
    #[must_use]
    pub fn compute(&self, series: &PriceSeries) -> LabelSet {
        let bars = series.bars();
        let closes = series.closes();

        let touch = first_touch(bars, self.config.horizon, self.config.touch_threshold);
        let trend = trend(bars, self.config.horizon);
        let slope = rolling_slopes(&closes, self.config.regime_window);
        let regime = regime(&slope, self.config.slope_threshold);

        tracing::debug!(
            bars = bars.len(),
            touch_defined = touch.iter().flatten().count(),
            trend_defined = trend.iter().flatten().count(),
            regime_defined = regime.iter().flatten().count(),
            "computed labels"
        );

        LabelSet {
            touch,
            trend,
            slope,
            regime,
        }
    }
}

/// Validates `config` and computes labels for `series`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn compute_labels(series: &PriceSeries, config: &LabelConfig) -> Result<LabelSet, ConfigError> {
    Ok(LabelEngine::new(*config)?.compute(series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, TimeZone, Utc};

    fn ramp(len: usize, step: f64) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2025, 1, 2, 6, 0, 0).unwrap();
        (0..len)
            .map(|i| {
                let c = 2000.0 + step * i as f64;
                Bar::new(start + TimeDelta::minutes(i as i64), c, c + 0.5, c - 0.5, c)
            })
            .collect()
    }

    fn config() -> LabelConfig {
        LabelConfig {
            horizon: 3,
            touch_threshold: 1.0,
            regime_window: 5,
            slope_threshold: 0.1,
        }
    }

    #[test]
    fn test_compute_on_ramp() {
        let series = ramp(10, 0.5);
        let labels = compute_labels(&series, &config()).unwrap();

        assert_eq!(labels.len(), 10);
        // Bar i+1 high = c + 1.0 reaches entry + 1.0.
        assert_eq!(labels.touch[0], Some(Direction::Up));
        assert_eq!(labels.trend[0], Some(Direction::Up));
        assert_eq!(labels.regime[0], Some(Direction::Up));
        assert_abs_diff_eq!(labels.slope[0].unwrap(), 0.5, epsilon = 1e-9);

        assert!(labels.touch[7..].iter().all(Option::is_none));
        assert!(labels.trend[7..].iter().all(Option::is_none));
        assert!(labels.slope[6..].iter().all(Option::is_none));
        assert!(labels.regime[6..].iter().all(Option::is_none));
    }

    #[test]
    fn test_compute_is_deterministic() {
        let series = ramp(50, -0.3);
        let engine = LabelEngine::new(config()).unwrap();
        assert_eq!(engine.compute(&series), engine.compute(&series));
    }

    #[test]
    fn test_invalid_config() {
        let bad = LabelConfig {
            regime_window: 0,
            ..config()
        };
        assert!(matches!(LabelEngine::new(bad), Err(ConfigError::WindowTooShort(0))));
    }

    #[test]
    fn test_empty_series() {
        let labels = compute_labels(&PriceSeries::default(), &config()).unwrap();
        assert!(labels.is_empty());
        let report = labels.report();
        assert_eq!(report.touch.summary.count, 0);
        assert_abs_diff_eq!(report.regime.average_run_length, 0.0);
    }

    #[test]
    fn test_labeled_bars() {
        let series = ramp(6, 1.0);
        let labels = compute_labels(&series, &config()).unwrap();
        let rows = labels.labeled_bars(series.bars());

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].bar, series.bars()[0]);
        assert_eq!(rows[0].target_trend, Some(Direction::Up));
        assert_eq!(rows[5].target_touch, None);

        let json = serde_json::to_value(rows[5]).unwrap();
        assert!(json["target_touch"].is_null());
        assert_eq!(json["timestamp"], series.bars()[5].timestamp_millis());
    }
}
