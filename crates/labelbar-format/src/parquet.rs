//! Apache Parquet output format.

use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int8Array, TimestampMillisecondArray, UInt32Array,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use labelbar_labels::LabeledBar;
use labelbar_pattern::PatternRow;
use labelbar_resample::ResampledBar;
use labelbar_types::{Bar, Direction, Quote};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
///
/// Label and pattern columns are nullable; an undefined cell is a null.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

fn timestamp_field() -> Field {
    Field::new(
        "timestamp",
        DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into())),
        false,
    )
}

fn price_fields(nullable: bool) -> [Field; 4] {
    ["open", "high", "low", "close"].map(|name| Field::new(name, DataType::Float64, nullable))
}

fn timestamps(millis: impl Iterator<Item = i64>) -> ArrayRef {
    Arc::new(TimestampMillisecondArray::from_iter_values(millis).with_timezone("UTC"))
}

fn floats(values: impl Iterator<Item = f64>) -> ArrayRef {
    Arc::new(Float64Array::from_iter_values(values))
}

fn labels(values: impl Iterator<Item = Option<Direction>>) -> ArrayRef {
    Arc::new(values.map(|v| v.map(Direction::as_i8)).collect::<Int8Array>())
}

fn quote_columns(quotes: &[Option<Quote>]) -> [ArrayRef; 4] {
    let column = |f: fn(&Quote) -> f64| -> ArrayRef {
        Arc::new(quotes.iter().map(|q| q.as_ref().map(f)).collect::<Float64Array>())
    };
    [
        column(|q| q.open),
        column(|q| q.high),
        column(|q| q.low),
        column(|q| q.close),
    ]
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for raw bars.
    fn bar_schema() -> Schema {
        let mut fields = vec![timestamp_field()];
        fields.extend(price_fields(false));
        for side in ["ask", "bid"] {
            fields.extend(
                ["open", "high", "low", "close"]
                    .map(|p| Field::new(format!("{p}_{side}"), DataType::Float64, true)),
            );
        }
        fields.push(Field::new("volume", DataType::Float64, true));
        Schema::new(fields)
    }

    /// Creates the Arrow schema for resampled bars.
    fn resampled_schema() -> Schema {
        let mut fields = vec![timestamp_field()];
        fields.extend(price_fields(false));
        fields.push(Field::new("volume", DataType::Float64, false));
        fields.push(Field::new("bar_count", DataType::UInt32, false));
        Schema::new(fields)
    }

    /// Creates the Arrow schema for labelled bars.
    fn labeled_schema() -> Schema {
        let mut fields = vec![timestamp_field()];
        fields.extend(price_fields(false));
        fields.extend([
            Field::new("target_touch", DataType::Int8, true),
            Field::new("target_trend", DataType::Int8, true),
            Field::new("slope", DataType::Float64, true),
            Field::new("target_regime", DataType::Int8, true),
        ]);
        Schema::new(fields)
    }

    /// Creates the Arrow schema for pattern rows.
    fn pattern_schema() -> Schema {
        Schema::new(vec![
            timestamp_field(),
            Field::new("ma_uptrend", DataType::Boolean, false),
            Field::new("pct_change", DataType::Float64, true),
            Field::new("pct_uptrend", DataType::Boolean, false),
            Field::new("pattern", DataType::Boolean, false),
            Field::new("profit_hit", DataType::Boolean, true),
        ])
    }

    fn bars_to_batch(schema: SchemaRef, bars: &[Bar]) -> Result<RecordBatch, FormatError> {
        let asks: Vec<_> = bars.iter().map(|b| b.ask).collect();
        let bids: Vec<_> = bars.iter().map(|b| b.bid).collect();

        let mut columns = vec![
            timestamps(bars.iter().map(Bar::timestamp_millis)),
            floats(bars.iter().map(|b| b.open)),
            floats(bars.iter().map(|b| b.high)),
            floats(bars.iter().map(|b| b.low)),
            floats(bars.iter().map(|b| b.close)),
        ];
        columns.extend(quote_columns(&asks));
        columns.extend(quote_columns(&bids));
        columns.push(Arc::new(bars.iter().map(|b| b.volume).collect::<Float64Array>()));

        RecordBatch::try_new(schema, columns).map_err(|e| FormatError::Parquet(e.to_string()))
    }

    fn resampled_to_batch(
        schema: SchemaRef,
        bars: &[ResampledBar],
    ) -> Result<RecordBatch, FormatError> {
        RecordBatch::try_new(
            schema,
            vec![
                timestamps(bars.iter().map(|b| b.timestamp.timestamp_millis())),
                floats(bars.iter().map(|b| b.open)),
                floats(bars.iter().map(|b| b.high)),
                floats(bars.iter().map(|b| b.low)),
                floats(bars.iter().map(|b| b.close)),
                floats(bars.iter().map(|b| b.volume)),
                Arc::new(UInt32Array::from_iter_values(bars.iter().map(|b| b.bar_count))),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    fn labeled_to_batch(schema: SchemaRef, rows: &[LabeledBar]) -> Result<RecordBatch, FormatError> {
        RecordBatch::try_new(
            schema,
            vec![
                timestamps(rows.iter().map(|r| r.bar.timestamp_millis())),
                floats(rows.iter().map(|r| r.bar.open)),
                floats(rows.iter().map(|r| r.bar.high)),
                floats(rows.iter().map(|r| r.bar.low)),
                floats(rows.iter().map(|r| r.bar.close)),
                labels(rows.iter().map(|r| r.target_touch)),
                labels(rows.iter().map(|r| r.target_trend)),
                Arc::new(rows.iter().map(|r| r.slope).collect::<Float64Array>()),
                labels(rows.iter().map(|r| r.target_regime)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    fn patterns_to_batch(schema: SchemaRef, rows: &[PatternRow]) -> Result<RecordBatch, FormatError> {
        let flags = |f: fn(&PatternRow) -> bool| -> ArrayRef {
            Arc::new(rows.iter().map(|r| Some(f(r))).collect::<BooleanArray>())
        };
        RecordBatch::try_new(
            schema,
            vec![
                timestamps(rows.iter().map(|r| r.timestamp.timestamp_millis())),
                flags(|r| r.ma_uptrend),
                Arc::new(rows.iter().map(|r| r.pct_change).collect::<Float64Array>()),
                flags(|r| r.pct_uptrend),
                flags(|r| r.pattern),
                Arc::new(rows.iter().map(|r| r.profit_hit).collect::<BooleanArray>()),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Writes `records` in row-group-sized batches.
    fn write_batches<T, W: Write + Send>(
        &self,
        schema: Schema,
        records: &[T],
        to_batch: fn(SchemaRef, &[T]) -> Result<RecordBatch, FormatError>,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(schema);
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in records.chunks(self.row_group_size.max(1)) {
            let batch = to_batch(Arc::clone(&schema), chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }
}

impl Formatter for ParquetFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError> {
        self.write_batches(Self::bar_schema(), bars, Self::bars_to_batch, writer)
    }

    fn write_resampled<W: Write + Send>(
        &self,
        bars: &[ResampledBar],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_batches(Self::resampled_schema(), bars, Self::resampled_to_batch, writer)
    }

    fn write_labeled<W: Write + Send>(
        &self,
        rows: &[LabeledBar],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_batches(Self::labeled_schema(), rows, Self::labeled_to_batch, writer)
    }

    fn write_patterns<W: Write + Send>(
        &self,
        rows: &[PatternRow],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_batches(Self::pattern_schema(), rows, Self::patterns_to_batch, writer)
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
