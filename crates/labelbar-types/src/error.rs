//! Error types for labelbar.

use chrono::NaiveDate;
use thiserror::Error;

use crate::Interval;

/// Result type alias for labelbar operations.
pub type Result<T> = std::result::Result<T, LabelbarError>;

/// Errors a [`BarSource`](crate::BarSource) can report.
#[derive(Error, Debug)]
pub enum LabelbarError {
    /// A bar source failed to deliver data.
    #[error("Source error: {0}")]
    Source(String),

    /// The source delivered no bars.
    #[error("No bars available from {source_name}")]
    NoData {
        /// Description of the source that came back empty.
        source_name: String,
    },

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),
}

/// Error for analysis parameters that cannot produce meaningful labels.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The forward horizon must cover at least one bar.
    #[error("horizon must be at least 1 bar")]
    ZeroHorizon,

    /// The regression window needs two points to define a slope.
    #[error("regime window must be at least 2 bars, got {0}")]
    WindowTooShort(usize),

    /// A threshold is negative, NaN or infinite.
    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidThreshold {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A resampling interval is not a whole multiple of the source interval.
    #[error("interval {target} is not a whole multiple of the source interval {finer}")]
    IncompatibleIntervals {
        /// The requested output interval.
        target: Interval,
        /// The interval of the input bars.
        finer: Interval,
    },

    /// A required environment variable is not set.
    #[error("{0} is not set in .env or the environment")]
    MissingEnv(String),
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}
