//! File input and output for labelbar.
//!
//! Bars are read from CSV files with [`load_csv`] or through [`CsvSource`].
//! Raw, resampled, labelled and pattern-annotated rows are written with
//! one of the formatters:
//!
//! - [`CsvFormatter`] - CSV format, undefined cells left empty
//! - [`JsonFormatter`] - JSON array or NDJSON format, undefined cells `null`
//! - [`ParquetFormatter`] - Apache Parquet columnar format, nullable label columns

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/labelbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod reader;
mod writer;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat, labeled_path};
pub use json::{JsonFormatter, JsonStyle};
pub use reader::{CsvSource, load_csv, read_csv_bars};
pub use writer::{Record, write_path};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
