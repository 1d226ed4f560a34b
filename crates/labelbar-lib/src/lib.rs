//! Forward-looking labels and pattern statistics for OHLC price series.
//!
//! This is a facade crate that re-exports functionality from the labelbar
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use labelbar_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let series = load_csv("gold_prices.csv".as_ref()).await?;
//!
//!     let labels = compute_labels(&series, &LabelConfig::default())?;
//!     println!("{:?}", labels.report());
//!
//!     let bars = resample(&series, Interval::MINUTE_15);
//!     let report = analyze_patterns(&bars, &PatternConfig::default())?;
//!     println!("{} patterns", report.pattern_count);
//!
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/labelbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use labelbar_types::*;

// Re-export the analysis passes
pub use labelbar_labels::{
    LabelEngine, LabelReport, LabelSet, LabelSummary, LabeledBar, TargetStats,
    average_run_length, compute_labels, first_touch, ols_slope, regime, rolling_slopes,
    summarize, trend,
};
pub use labelbar_pattern::{PatternDetector, PatternReport, PatternRow, analyze_patterns, annotate};
pub use labelbar_resample::{BarAggregator, Completeness, ResampledBar, Resampler, resample};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use labelbar_fetch::{
    ClientConfig, FetchError, FetchWindow, IgClient, IgCredentials, IgSource, Snapshot,
    fetch_markets, parse_snapshot,
};

// Re-export file input and output
#[cfg(feature = "format")]
pub use labelbar_format::{
    CsvFormatter, CsvSource, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
    Record, labeled_path, load_csv, read_csv_bars, write_path,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use labelbar_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use labelbar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use labelbar_types::{
        AnalysisConfig, Bar, BarSource, DateRange, Direction, Interval,
        LabelConfig, LabelbarError, Market, Ohlc, PatternConfig, PriceSeries, Result,
    };

    pub use labelbar_labels::{LabelEngine, LabelReport, LabelSet, compute_labels};
    pub use labelbar_pattern::{PatternDetector, PatternReport, analyze_patterns};
    pub use labelbar_resample::{Completeness, ResampledBar, Resampler, resample};

    #[cfg(feature = "fetch")]
    pub use labelbar_fetch::{ClientConfig, FetchWindow, IgClient, IgCredentials, IgSource};

    #[cfg(feature = "format")]
    pub use labelbar_format::{
        CsvFormatter, CsvSource, Formatter, JsonFormatter, OutputFormat, labeled_path, load_csv,
        write_path,
    };

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use labelbar_format::ParquetFormatter;
}
