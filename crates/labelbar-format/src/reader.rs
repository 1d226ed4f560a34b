//! Bar ingestion from CSV files.
//!
//! Column names are matched case-insensitively with `Price` and `_`
//! ignored, so both `closePrice_ask` (the broker export) and `close_ask`
//! (what [`CsvFormatter`](crate::CsvFormatter) writes) are understood.
//! Extra columns, such as a leading index column, are ignored.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use labelbar_types::{Bar, BarSource, DateRange, LabelbarError, PriceSeries, Quote};
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;

use crate::FormatError;

const PRICE_FIELDS: [&str; 4] = ["open", "high", "low", "close"];

/// Column positions resolved from a header row.
#[derive(Debug)]
struct ColumnMap {
    timestamp: usize,
    prices: [usize; 4],
    ask: Option<[usize; 4]>,
    bid: Option<[usize; 4]>,
    volume: Option<usize>,
}

fn normalize(name: &str) -> String {
    name.to_lowercase().replace("price", "").replace('_', "")
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, FormatError> {
        let names: Vec<String> = headers.iter().map(normalize).collect();
        let find = |key: &str| names.iter().position(|n| n == key);
        let side = |suffix: &str| -> Option<[usize; 4]> {
            let [o, h, l, c] = PRICE_FIELDS.map(|f| find(&format!("{f}{suffix}")));
            Some([o?, h?, l?, c?])
        };

        let timestamp = find("timestamp")
            .or_else(|| find("time"))
            .ok_or(FormatError::MissingColumn("timestamp"))?;
        let mut prices = [0; 4];
        for (slot, field) in prices.iter_mut().zip(PRICE_FIELDS) {
            *slot = find(field).ok_or(FormatError::MissingColumn(field))?;
        }

        Ok(Self {
            timestamp,
            prices,
            ask: side("ask"),
            bid: side("bid"),
            volume: find("volume").or_else(|| find("lasttradedvolume")),
        })
    }

    fn bar(&self, record: &StringRecord) -> Option<Bar> {
        let timestamp = parse_timestamp(record.get(self.timestamp)?)?;
        let [open, high, low, close] = self.prices.map(|i| price(record, i));

        let quote = |columns: Option<[usize; 4]>| {
            let [o, h, l, c] = columns?.map(|i| price(record, i));
            let quote = Quote::new(o, h, l, c);
            [o, h, l, c].iter().all(|v| v.is_finite()).then_some(quote)
        };

        Some(Bar {
            timestamp,
            open,
            high,
            low,
            close,
            ask: quote(self.ask),
            bid: quote(self.bid),
            volume: self
                .volume
                .map(|i| price(record, i))
                .filter(|v| v.is_finite()),
        })
    }
}

/// Unparsable or empty cells read as NaN.
fn price(record: &StringRecord, index: usize) -> f64 {
    record
        .get(index)
        .and_then(|s| s.parse().ok())
        .unwrap_or(f64::NAN)
}

/// Accepts epoch milliseconds, RFC 3339, or `YYYY-MM-DD HH:MM:SS` in UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(millis) = s.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Reads bars from CSV data.
///
/// Rows with an unreadable timestamp are skipped with a warning. The
/// result is sorted by timestamp; for duplicate timestamps the later row
/// wins.
///
/// # Errors
///
/// Returns an error if the data is not valid CSV or a required column
/// (`timestamp`, `open`, `high`, `low`, `close`) is missing.
pub async fn read_csv_bars<R>(reader: R) -> Result<PriceSeries, FormatError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .create_reader(reader);
    let columns = ColumnMap::from_headers(reader.headers().await?)?;

    let mut bars = Vec::new();
    let mut skipped = 0usize;
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).await? {
        match columns.bar(&record) {
            Some(bar) => bars.push(bar),
            None => {
                skipped += 1;
                tracing::warn!(
                    line = record.position().map(|p| p.line()),
                    "skipping row with unreadable timestamp"
                );
            }
        }
    }

    tracing::debug!(rows = bars.len(), skipped, "read CSV bars");
    Ok(PriceSeries::from_unsorted(bars))
}

/// Loads bars from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub async fn load_csv(path: &Path) -> Result<PriceSeries, FormatError> {
    let file = tokio::fs::File::open(path).await?;
    let series = read_csv_bars(file).await?;
    tracing::info!(path = %path.display(), bars = series.len(), "loaded bars");
    Ok(series)
}

/// A CSV file as a [`BarSource`], optionally restricted to a date range.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    range: Option<DateRange>,
}

impl CsvSource {
    /// Creates a source reading every bar in `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            range: None,
        }
    }

    /// Keeps only bars within the session bounds of `range`.
    #[must_use]
    pub const fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BarSource for CsvSource {
    async fn load(&self) -> labelbar_types::Result<PriceSeries> {
        let series = load_csv(&self.path)
            .await
            .map_err(|e| LabelbarError::Format(e.to_string()))?;
        Ok(match &self.range {
            Some(range) => series.filter_range(range),
            None => series,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
