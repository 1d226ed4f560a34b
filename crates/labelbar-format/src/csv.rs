//! CSV output format.

use labelbar_labels::LabeledBar;
use labelbar_pattern::PatternRow;
use labelbar_resample::ResampledBar;
use labelbar_types::{Bar, Direction, Quote};
use std::fmt::Display;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// Timestamps are written as epoch milliseconds, the form the loader and
/// the broker feed both use. Undefined cells are left empty.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    fn header<W: Write>(&self, writer: &mut W, columns: &[&str]) -> Result<(), FormatError> {
        if self.include_header {
            writeln!(writer, "{}", columns.join(&self.delimiter.to_string()))?;
        }
        Ok(())
    }
}

fn cell<T: Display>(value: Option<T>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

fn label(value: Option<Direction>) -> String {
    cell(value.map(Direction::as_i8))
}

fn quote_cells(quote: Option<Quote>, d: char) -> String {
    match quote {
        Some(q) => format!("{}{d}{}{d}{}{d}{}", q.open, q.high, q.low, q.close),
        None => format!("{d}{d}{d}"),
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;
        self.header(
            &mut writer,
            &[
                "timestamp",
                "open",
                "high",
                "low",
                "close",
                "open_ask",
                "high_ask",
                "low_ask",
                "close_ask",
                "open_bid",
                "high_bid",
                "low_bid",
                "close_bid",
                "volume",
            ],
        )?;

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.timestamp_millis(),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                quote_cells(bar.ask, d),
                quote_cells(bar.bid, d),
                cell(bar.volume),
            )?;
        }

        Ok(())
    }

    fn write_resampled<W: Write + Send>(
        &self,
        bars: &[ResampledBar],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;
        self.header(
            &mut writer,
            &["timestamp", "open", "high", "low", "close", "volume", "bar_count"],
        )?;

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.timestamp.timestamp_millis(),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume,
                bar.bar_count
            )?;
        }

        Ok(())
    }

    fn write_labeled<W: Write + Send>(
        &self,
        rows: &[LabeledBar],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;
        self.header(
            &mut writer,
            &[
                "timestamp",
                "open",
                "high",
                "low",
                "close",
                "target_touch",
                "target_trend",
                "slope",
                "target_regime",
            ],
        )?;

        for row in rows {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                row.bar.timestamp_millis(),
                row.bar.open,
                row.bar.high,
                row.bar.low,
                row.bar.close,
                label(row.target_touch),
                label(row.target_trend),
                cell(row.slope),
                label(row.target_regime),
            )?;
        }

        Ok(())
    }

    fn write_patterns<W: Write + Send>(
        &self,
        rows: &[PatternRow],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;
        self.header(
            &mut writer,
            &[
                "timestamp",
                "ma_uptrend",
                "pct_change",
                "pct_uptrend",
                "pattern",
                "profit_hit",
            ],
        )?;

        for row in rows {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                row.timestamp.timestamp_millis(),
                row.ma_uptrend,
                cell(row.pct_change),
                row.pct_uptrend,
                row.pattern,
                cell(row.profit_hit),
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
