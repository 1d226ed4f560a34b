//! Pull-back pattern scan and next-bar profit check.

use chrono::{DateTime, Utc};
use labelbar_types::{ConfigError, Ohlc, PatternConfig};
use serde::Serialize;

use crate::PatternReport;

/// Pattern columns for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatternRow {
    /// Bar open time.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// The bar closed above its open.
    pub ma_uptrend: bool,
    /// Fractional close change over the last two bars.
    pub pct_change: Option<f64>,
    /// `pct_change` exceeds the up-move threshold.
    pub pct_uptrend: bool,
    /// The bar completes the pattern.
    pub pattern: bool,
    /// The next bar's high reaches `close + delta_price`. `None` on the
    /// last bar and when either price is missing.
    pub profit_hit: Option<bool>,
}

/// Computes the pattern columns for every bar.
///
/// Bar `t` completes the pattern when its two-bar close change is above
/// the threshold, bar `t - 1` is bullish and bar `t` itself is bearish.
/// With `require_prior_up` bar `t - 2` must be bullish as well.
#[must_use]
pub fn annotate<T: Ohlc>(bars: &[T], config: &PatternConfig) -> Vec<PatternRow> {
    let ma_uptrend: Vec<bool> = bars.iter().map(Ohlc::is_bullish).collect();

    bars.iter()
        .enumerate()
        .map(|(t, bar)| {
            let pct_change = t
                .checked_sub(2)
                .and_then(|base| pct_change(bars[base].close(), bar.close()));
            let pct_uptrend = pct_change.is_some_and(|p| p > config.pct_uptrend_threshold);

            let prior_up = |back: usize| t.checked_sub(back).is_some_and(|i| ma_uptrend[i]);
            let pattern = pct_uptrend
                && prior_up(1)
                && bar.is_bearish()
                && (!config.require_prior_up || prior_up(2));

            let profit_hit = bars.get(t + 1).and_then(|next| {
                let (high, close) = (next.high(), bar.close());
                (high.is_finite() && close.is_finite()).then(|| high - close >= config.delta_price)
            });

            PatternRow {
                timestamp: bar.timestamp(),
                ma_uptrend: ma_uptrend[t],
                pct_change,
                pct_uptrend,
                pattern,
                profit_hit,
            }
        })
        .collect()
}

fn pct_change(base: f64, close: f64) -> Option<f64> {
    if base == 0.0 || !base.is_finite() || !close.is_finite() {
        return None;
    }
    Some((close - base) / base)
}

/// Scans bars for the pull-back pattern with a validated configuration.
#[derive(Debug, Clone, Copy)]
pub struct PatternDetector {
    config: PatternConfig,
}

impl PatternDetector {
    /// Creates a detector after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is negative or not finite.
    pub fn new(config: PatternConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the detector configuration.
    #[must_use]
    pub const fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Computes the per-bar pattern columns.
    #[must_use]
    pub fn annotate<T: Ohlc>(&self, bars: &[T]) -> Vec<PatternRow> {
        annotate(bars, &self.config)
    }

    /// Scans `bars` and summarizes pattern and baseline hit rates.
    #[must_use]
    pub fn analyze<T: Ohlc>(&self, bars: &[T]) -> PatternReport {
        let rows = self.annotate(bars);
        let report = PatternReport::from_rows(&rows);
        tracing::debug!(
            bars = bars.len(),
            patterns = report.pattern_count,
            require_prior_up = self.config.require_prior_up,
            "analyzed patterns"
        );
        report
    }
}

/// Validates `config` and analyzes `bars`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn analyze_patterns<T: Ohlc>(
    bars: &[T],
    config: &PatternConfig,
) -> Result<PatternReport, ConfigError> {
    Ok(PatternDetector::new(*config)?.analyze(bars))
}
