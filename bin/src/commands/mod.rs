//! CLI command implementations.

pub(crate) mod fetch;
pub(crate) mod labels;
pub(crate) mod markets;
pub(crate) mod patterns;
pub(crate) mod resample;

use anyhow::{Context, Result, bail};
use labelbar_lib::prelude::*;
use std::path::Path;

/// Loads an input file through [`CsvSource`], optionally filtered to a
/// session range. An empty result is an error.
pub(crate) async fn load_bars(input: &Path, range: Option<DateRange>) -> Result<PriceSeries> {
    let mut source = CsvSource::new(input);
    if let Some(range) = range {
        source = source.with_range(range);
    }

    let series = source
        .load()
        .await
        .with_context(|| format!("Failed to load {}", source.describe()))?;
    if series.is_empty() {
        bail!("No bars in {}", source.describe());
    }
    Ok(series)
}

/// Parses an interval argument such as `15m` or `4h`.
pub(crate) fn parse_interval(s: &str) -> Result<Interval> {
    s.parse::<Interval>().map_err(|e| anyhow::anyhow!("{e}"))
}
