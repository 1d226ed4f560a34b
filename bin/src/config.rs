//! Configuration file loading and command-line overrides.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use labelbar_lib::prelude::*;
use std::path::Path;

/// Reads the analysis configuration from `path`, or the defaults when no
/// file is given. Missing keys fall back to their defaults.
pub(crate) fn load(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse(&text).with_context(|| format!("Invalid config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

fn parse(text: &str) -> Result<AnalysisConfig> {
    let config: AnalysisConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Label settings that override the config file.
#[derive(Args, Debug, Default)]
pub(crate) struct LabelOverrides {
    /// Forward bars examined by the touch and trend labels
    #[arg(long)]
    horizon: Option<usize>,

    /// Distance from the entry close to each touch barrier
    #[arg(long)]
    touch_threshold: Option<f64>,

    /// Bars in the forward regression window
    #[arg(long)]
    regime_window: Option<usize>,

    /// Slope per bar beyond which the regime is up or down
    #[arg(long)]
    slope_threshold: Option<f64>,
}

impl LabelOverrides {
    pub(crate) fn apply(self, mut config: LabelConfig) -> LabelConfig {
        if let Some(horizon) = self.horizon {
            config.horizon = horizon;
        }
        if let Some(threshold) = self.touch_threshold {
            config.touch_threshold = threshold;
        }
        if let Some(window) = self.regime_window {
            config.regime_window = window;
        }
        if let Some(threshold) = self.slope_threshold {
            config.slope_threshold = threshold;
        }
        config
    }
}

/// Pattern settings that override the config file.
#[derive(Args, Debug, Default)]
pub(crate) struct PatternOverrides {
    /// Profit target measured from the close to the next bar's high
    #[arg(long)]
    delta_price: Option<f64>,

    /// Two-bar fractional close change that counts as an up move
    #[arg(long)]
    threshold: Option<f64>,

    /// Also require the bar two intervals back to be bullish
    #[arg(long)]
    three_bar: bool,
}

impl PatternOverrides {
    pub(crate) fn apply(self, mut config: PatternConfig) -> PatternConfig {
        if let Some(delta) = self.delta_price {
            config.delta_price = delta;
        }
        if let Some(threshold) = self.threshold {
            config.pct_uptrend_threshold = threshold;
        }
        if self.three_bar {
            config.require_prior_up = true;
        }
        config
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date: {s}"))
}

/// Builds the session filter from `--start` / `--end`.
///
/// A missing end defaults to today; an end alone keeps everything up to it.
pub(crate) fn date_range(start: Option<&str>, end: Option<&str>) -> Result<Option<DateRange>> {
    let end = end.map(parse_date).transpose()?;
    let range = match (start, end) {
        (None, None) => return Ok(None),
        (None, Some(end)) => DateRange::until(end),
        (Some(start), end) => DateRange::new(
            parse_date(start)?,
            end.unwrap_or_else(|| chrono::Utc::now().date_naive()),
        )?,
    };
    Ok(Some(range))
}
