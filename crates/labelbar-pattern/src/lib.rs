//! Multi-bar pattern detection for labelbar.
//!
//! This crate scans bars (usually resampled, see `labelbar-resample`) for
//! a pull-back after an up move and checks whether the next bar offers a
//! fixed profit:
//!
//! - [`annotate`] - Per-bar direction, momentum, pattern and profit-hit columns
//! - [`PatternDetector`] - Validated configuration plus the analysis pass
//! - [`PatternReport`] - Pattern count, success rates and frequency

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/labelbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod detector;
mod report;

pub use detector::{PatternDetector, PatternRow, analyze_patterns, annotate};
pub use report::PatternReport;
