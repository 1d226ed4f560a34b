//! Forward-looking bar labels for labelbar.
//!
//! This crate derives per-bar targets from a [`PriceSeries`](labelbar_types::PriceSeries)
//! and summarizes their distributions:
//!
//! - [`first_touch`] - Which of two symmetric barriers is reached first
//! - [`trend`] - Sign of the close-to-close move over a fixed horizon
//! - [`rolling_slopes`] / [`regime`] - Forward least-squares slope and its regime class
//! - [`LabelEngine`] - Runs all three passes and returns a [`LabelSet`]
//! - [`summarize`] / [`average_run_length`] - Label distribution statistics
//!
//! Bars too close to the end of the series for a forward window, or with
//! missing prices, get `None` instead of a label. Every statistic skips
//! those cells.

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/labelbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod regime;
mod summary;
mod touch;
mod trend;

pub use engine::{LabelEngine, LabelSet, LabeledBar, compute_labels};
pub use regime::{ols_slope, regime, rolling_slopes};
pub use summary::{LabelReport, LabelSummary, TargetStats, average_run_length, summarize};
pub use touch::first_touch;
pub use trend::trend;
