//! OHLC resampling for labelbar.
//!
//! This crate aggregates fine-grained bars into coarser ones:
//!
//! - [`ResampledBar`] - Aggregated bar with the number of source bars it covers
//! - [`BarAggregator`] - Streaming bar aggregator
//! - [`Resampler`] - Batch resampling with a [`Completeness`] policy
//! - [`resample`] - Resamples a series with the default policy

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/labelbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod resampled;
mod resampler;

pub use aggregator::BarAggregator;
pub use resampled::ResampledBar;
pub use resampler::{Completeness, Resampler, resample};
