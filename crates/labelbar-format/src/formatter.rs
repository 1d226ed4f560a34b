//! Output format abstraction.

use labelbar_labels::LabeledBar;
use labelbar_pattern::PatternRow;
use labelbar_resample::ResampledBar;
use labelbar_types::Bar;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// Apache Parquet format.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Ndjson, Self::Parquet]
    }

    /// Guesses the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Default path for the labelled copy of `input`: `<stem>_with_targets.<ext>`
/// next to the input file.
#[must_use]
pub fn labeled_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "bars".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_with_targets.{}", format.extension()))
}

/// Errors that can occur while reading or writing files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// The format was disabled at compile time.
    #[error("{0} support not compiled in")]
    Unsupported(OutputFormat),

    /// A required input column is absent.
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes raw bars to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError>;

    /// Writes resampled bars to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_resampled<W: Write + Send>(
        &self,
        bars: &[ResampledBar],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes bars together with their label columns.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_labeled<W: Write + Send>(
        &self,
        rows: &[LabeledBar],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes per-bar pattern columns.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_patterns<W: Write + Send>(
        &self,
        rows: &[PatternRow],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert_eq!("pq".parse::<OutputFormat>().unwrap(), OutputFormat::Parquet);
        assert!(matches!(
            "xlsx".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("data/gold.parquet")),
            Some(OutputFormat::Parquet)
        );
        assert_eq!(OutputFormat::from_path(Path::new("gold")), None);
    }

    #[test]
    fn test_labeled_path() {
        assert_eq!(
            labeled_path(Path::new("data/gold_prices.csv"), OutputFormat::Csv),
            PathBuf::from("data/gold_prices_with_targets.csv")
        );
        assert_eq!(
            labeled_path(Path::new("gold_prices.csv"), OutputFormat::Parquet),
            PathBuf::from("gold_prices_with_targets.parquet")
        );
    }
}
