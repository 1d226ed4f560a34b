//! Core types for the labelbar price-series toolkit.
//!
//! This crate provides the data structures shared by every stage of the
//! labelling and pattern pipelines:
//!
//! - [`Bar`] - A single OHLC observation, optionally carrying ask/bid sides
//! - [`PriceSeries`] - A time-ordered sequence of bars
//! - [`Direction`] - Three-way label value (down, flat, up)
//! - [`Interval`] - Resampling interval in whole minutes
//! - [`DateRange`] - Inclusive date range with session-cutoff bounds
//! - [`Market`] - Broker markets the fetcher knows about
//! - [`AnalysisConfig`] - Thresholds and windows for the analysis passes
//! - [`BarSource`] - Anything that can deliver a [`PriceSeries`]

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/labelbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod config;
mod date_range;
mod direction;
mod error;
mod interval;
mod market;
mod series;
mod source;

pub use bar::{Bar, Ohlc, Quote};
pub use config::{AnalysisConfig, LabelConfig, PatternConfig};
pub use date_range::{DateRange, SESSION_CUTOFF_HOUR};
pub use direction::Direction;
pub use error::{ConfigError, DateRangeError, LabelbarError, Result};
pub use interval::{Interval, IntervalParseError};
pub use market::{Market, MarketParseError};
pub use series::PriceSeries;
pub use source::BarSource;
