//! Patterns command implementation.

use anyhow::{Context, Result};
use labelbar_lib::PatternReport;
use labelbar_lib::prelude::*;
use std::path::Path;

use super::resample::resampler;
use super::{load_bars, parse_interval};
use crate::display::print_pattern_report;

/// Resample the input, scan it for the pattern and report hit rates.
pub(crate) async fn patterns(
    input: &Path,
    interval: &str,
    rows_output: Option<&Path>,
    allow_partial: bool,
    json: bool,
    config: PatternConfig,
) -> Result<()> {
    let detector = PatternDetector::new(config).context("Invalid pattern settings")?;
    let interval = parse_interval(interval)?;
    let series = load_bars(input, None).await?;

    let bars = resampler(interval, allow_partial).resample(series.bars());
    let rows = detector.annotate(&bars);
    let report = PatternReport::from_rows(&rows);

    if let Some(path) = rows_output {
        let format = OutputFormat::from_path(path).unwrap_or_default();
        write_path(&rows, path, format)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), rows = rows.len(), "wrote pattern rows");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_pattern_report(&report, detector.config());
    }
    Ok(())
}
