//! Analysis parameters.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Parameters for the label pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Number of forward bars examined by the first-touch and trend labels.
    pub horizon: usize,
    /// Distance from the entry close to each first-touch barrier.
    pub touch_threshold: f64,
    /// Number of bars in the forward regression window.
    pub regime_window: usize,
    /// Slope (price units per bar) beyond which a window counts as trending.
    pub slope_threshold: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            horizon: 15,
            touch_threshold: 10.0,
            regime_window: 240,
            slope_threshold: 0.02,
        }
    }
}

impl LabelConfig {
    /// Checks that the parameters can produce labels.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero horizon, a regime window shorter than
    /// two bars, or a negative or non-finite threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if self.regime_window < 2 {
            return Err(ConfigError::WindowTooShort(self.regime_window));
        }
        check_threshold("touch_threshold", self.touch_threshold)?;
        check_threshold("slope_threshold", self.slope_threshold)
    }
}

/// Parameters for the pattern pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Two-bar fractional close change above which a bar counts as an up move.
    pub pct_uptrend_threshold: f64,
    /// Move from the close to the next bar's high that counts as a profit hit.
    pub delta_price: f64,
    /// Also require the bar two intervals back to be bullish.
    pub require_prior_up: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            pct_uptrend_threshold: 0.00095,
            delta_price: 10.0,
            require_prior_up: false,
        }
    }
}

impl PatternConfig {
    /// Checks that the thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("pct_uptrend_threshold", self.pct_uptrend_threshold)?;
        check_threshold("delta_price", self.delta_price)
    }
}

/// Complete analysis configuration, as read from a config file.
///
/// ```toml
/// [labels]
/// horizon = 15
/// touch_threshold = 10.0
///
/// [patterns]
/// delta_price = 20.0
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Label pass parameters.
    pub labels: LabelConfig,
    /// Pattern pass parameters.
    pub patterns: PatternConfig,
}

impl AnalysisConfig {
    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.labels.validate()?;
        self.patterns.validate()
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.labels.horizon, 15);
        assert_eq!(config.labels.regime_window, 240);
        assert!((config.labels.touch_threshold - 10.0).abs() < f64::EPSILON);
        assert!((config.labels.slope_threshold - 0.02).abs() < f64::EPSILON);
        assert!((config.patterns.pct_uptrend_threshold - 0.00095).abs() < f64::EPSILON);
        assert!((config.patterns.delta_price - 10.0).abs() < f64::EPSILON);
        assert!(!config.patterns.require_prior_up);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = LabelConfig {
            horizon: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroHorizon));

        let short = LabelConfig {
            regime_window: 1,
            ..Default::default()
        };
        assert_eq!(short.validate(), Err(ConfigError::WindowTooShort(1)));

        let negative = PatternConfig {
            delta_price: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::InvalidThreshold {
                name: "delta_price",
                ..
            })
        ));

        let nan = LabelConfig {
            slope_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"labels": {"horizon": 30}}"#).unwrap();
        assert_eq!(config.labels.horizon, 30);
        assert_eq!(config.labels.regime_window, 240);
        assert_eq!(config.patterns, PatternConfig::default());
    }
}
