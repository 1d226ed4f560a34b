//! Writing records to files.

use labelbar_labels::LabeledBar;
use labelbar_pattern::PatternRow;
use labelbar_resample::ResampledBar;
use labelbar_types::Bar;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

/// A row type every [`Formatter`] knows how to write.
pub trait Record: Sized {
    /// Writes `records` with `formatter`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_with<F: Formatter, W: Write + Send>(
        formatter: &F,
        records: &[Self],
        writer: W,
    ) -> Result<(), FormatError>;
}

impl Record for Bar {
    fn write_with<F: Formatter, W: Write + Send>(
        formatter: &F,
        records: &[Self],
        writer: W,
    ) -> Result<(), FormatError> {
        formatter.write_bars(records, writer)
    }
}

impl Record for ResampledBar {
    fn write_with<F: Formatter, W: Write + Send>(
        formatter: &F,
        records: &[Self],
        writer: W,
    ) -> Result<(), FormatError> {
        formatter.write_resampled(records, writer)
    }
}

impl Record for LabeledBar {
    fn write_with<F: Formatter, W: Write + Send>(
        formatter: &F,
        records: &[Self],
        writer: W,
    ) -> Result<(), FormatError> {
        formatter.write_labeled(records, writer)
    }
}

impl Record for PatternRow {
    fn write_with<F: Formatter, W: Write + Send>(
        formatter: &F,
        records: &[Self],
        writer: W,
    ) -> Result<(), FormatError> {
        formatter.write_patterns(records, writer)
    }
}

/// Writes `records` to a new file at `path` in the given format.
///
/// # Errors
///
/// Returns an error if the file cannot be created, writing fails, or
/// the format was not compiled in.
pub fn write_path<R: Record>(
    records: &[R],
    path: &Path,
    format: OutputFormat,
) -> Result<(), FormatError> {
    let mut writer = BufWriter::new(File::create(path)?);

    match format {
        OutputFormat::Csv => R::write_with(&CsvFormatter::new(), records, &mut writer)?,
        OutputFormat::Json => R::write_with(&JsonFormatter::new(), records, &mut writer)?,
        OutputFormat::Ndjson => R::write_with(&JsonFormatter::ndjson(), records, &mut writer)?,
        OutputFormat::Parquet => {
            #[cfg(feature = "parquet")]
            {
                R::write_with(&crate::ParquetFormatter::new(), records, &mut writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                return Err(FormatError::Unsupported(format));
            }
        }
    }

    writer.flush()?;
    tracing::debug!(path = %path.display(), rows = records.len(), %format, "wrote file");
    Ok(())
}
