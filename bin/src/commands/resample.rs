//! Resample command implementation.

use anyhow::{Context, Result};
use labelbar_lib::prelude::*;
use std::path::{Path, PathBuf};

use super::{load_bars, parse_interval};
use crate::display::Format;

/// Resample one-minute bars and write the buckets.
pub(crate) async fn resample(
    input: &Path,
    interval: &str,
    output: Option<PathBuf>,
    format: Format,
    allow_partial: bool,
) -> Result<()> {
    let interval = parse_interval(interval)?;
    let format = OutputFormat::from(format);
    let series = load_bars(input, None).await?;

    let bars = resampler(interval, allow_partial).resample(series.bars());

    let output = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{stem}_{interval}.{}", format.extension()))
    });
    write_path(&bars, &output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Resampled {} bars into {} {} bars: {}",
        series.len(),
        bars.len(),
        interval,
        output.display()
    );
    Ok(())
}

/// Resampler for one-minute input with the chosen completeness rule.
pub(crate) const fn resampler(interval: Interval, allow_partial: bool) -> Resampler {
    let completeness = if allow_partial {
        Completeness::NonEmpty
    } else {
        Completeness::Full
    };
    Resampler::new(interval).with_completeness(completeness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    #[tokio::test]
    async fn test_resample_writes_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gold_prices.csv");
        let start = Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap();
        let bars: Vec<Bar> = (0..35)
            .map(|i| {
                let c = 2650.0 + f64::from(i);
                Bar::new(start + TimeDelta::minutes(i64::from(i)), c, c + 1.0, c - 1.0, c)
            })
            .collect();
        write_path(&bars, &input, OutputFormat::Csv).unwrap();

        resample(&input, "15m", None, Format::Csv, false).await.unwrap();

        let output = dir.path().join("gold_prices_15m.csv");
        let text = std::fs::read_to_string(output).unwrap();
        // Header plus two full buckets; the 5-bar tail is dropped.
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_resampler_policy() {
        assert_eq!(resampler(Interval::MINUTE_15, false).expected_bars(), 15);
        let partial = resampler(Interval::MINUTE_15, true).resample(&[]);
        assert!(partial.is_empty());
    }
}
