//! JSON output format.

use labelbar_labels::LabeledBar;
use labelbar_pattern::PatternRow;
use labelbar_resample::ResampledBar;
use labelbar_types::Bar;
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
///
/// Timestamps are epoch milliseconds and undefined cells are `null`.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_records<T: Serialize, W: Write>(
        &self,
        records: &[T],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, records)?;
                } else {
                    serde_json::to_writer(&mut writer, records)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError> {
        self.write_records(bars, writer)
    }

    fn write_resampled<W: Write + Send>(
        &self,
        bars: &[ResampledBar],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_records(bars, writer)
    }

    fn write_labeled<W: Write + Send>(
        &self,
        rows: &[LabeledBar],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_records(rows, writer)
    }

    fn write_patterns<W: Write + Send>(
        &self,
        rows: &[PatternRow],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_records(rows, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use labelbar_types::Direction;
    use std::io::Cursor;

    fn create_test_bar() -> Bar {
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap();
        Bar::new(timestamp, 1.5, 2.0, 1.0, 1.75)
    }

    #[test]
    fn test_json_array() {
        let formatter = JsonFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&[create_test_bar()], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with('['));
        assert!(result.contains("\"timestamp\":1736944200000"));
        assert!(result.contains("\"close\":1.75"));
        assert!(!result.contains("\"ask\""));
    }

    #[test]
    fn test_ndjson_labeled_nulls() {
        let formatter = JsonFormatter::ndjson();
        let row = LabeledBar {
            bar: create_test_bar(),
            target_touch: Some(Direction::Down),
            target_trend: None,
            slope: None,
            target_regime: Some(Direction::Flat),
        };
        let mut output = Cursor::new(Vec::new());

        formatter.write_labeled(&[row, row], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["target_touch"], -1);
        assert!(value["target_trend"].is_null());
        assert!(value["slope"].is_null());
        assert_eq!(value["target_regime"], 0);
        assert_eq!(value["open"], 1.5);
    }

    #[test]
    fn test_pretty_json() {
        let formatter = JsonFormatter::new().with_pretty(true);
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&[create_test_bar()], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains('\n'));
        assert!(result.contains("  ")); // Indentation
    }
}
