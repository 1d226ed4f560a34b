//! Fetch command implementation.
//!
//! Downloads one-minute bars from IG and writes one file per market,
//! optionally merging into what is already on disk.

use anyhow::{Context, Result, anyhow, bail};
use labelbar_lib::fetch_markets;
use labelbar_lib::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::display::{Format, spinner};

/// Fetch recent bars for the given markets (all markets when empty).
pub(crate) async fn fetch(
    market_ids: &[String],
    output_dir: &Path,
    format: Format,
    append: bool,
    quiet: bool,
) -> Result<()> {
    let markets = parse_markets(market_ids)?;
    let format = OutputFormat::from(format);
    if append && format != OutputFormat::Csv {
        bail!("--append needs CSV output, the only format that can be read back");
    }

    let credentials = IgCredentials::from_env().context("Missing IG credentials")?;

    let mut existing = if append {
        load_existing(output_dir, &markets, format).await?
    } else {
        HashMap::new()
    };

    let progress = spinner(quiet, format!("Fetching {} markets from IG", markets.len()));
    let client = Arc::new(
        IgClient::connect(&credentials, ClientConfig::default())
            .await
            .context("Failed to log in to IG")?,
    );
    let results = fetch_markets(&client, &markets, |market| {
        existing.get(&market).and_then(PriceSeries::last_timestamp)
    })
    .await;
    progress.finish_and_clear();

    let mut failures = 0usize;
    for (market, result) in results {
        let fetched = match result {
            Ok(series) => series,
            Err(e) => {
                failures += 1;
                tracing::error!(%market, error = %e, "fetch failed");
                eprintln!("{market}: {e}");
                continue;
            }
        };

        let path = output_path(output_dir, market, format);
        let previous = existing.remove(&market).unwrap_or_default();
        let (total, added) = save_merged(previous, fetched, &path, format)?;
        println!("{market}: {total} bars ({added} new) -> {}", path.display());
    }

    if failures > 0 {
        bail!("{failures} of {} markets failed", markets.len());
    }
    Ok(())
}

/// Reads the files a previous fetch wrote, skipping markets with none.
async fn load_existing(
    dir: &Path,
    markets: &[Market],
    format: OutputFormat,
) -> Result<HashMap<Market, PriceSeries>> {
    let mut existing = HashMap::new();
    for &market in markets {
        let path = output_path(dir, market, format);
        if path.exists() {
            let series = load_csv(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            existing.insert(market, series);
        }
    }
    Ok(existing)
}

/// Merges `fetched` into `previous` (fetched rows win on equal
/// timestamps) and writes the result. Returns total and added row counts.
fn save_merged(
    previous: PriceSeries,
    fetched: PriceSeries,
    path: &Path,
    format: OutputFormat,
) -> Result<(usize, usize)> {
    let before = previous.len();
    let merged = previous.merge(fetched);
    write_path(merged.bars(), path, format)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok((merged.len(), merged.len().saturating_sub(before)))
}

fn parse_markets(ids: &[String]) -> Result<Vec<Market>> {
    if ids.is_empty() {
        return Ok(Market::all().to_vec());
    }
    ids.iter()
        .map(|id| id.parse::<Market>().map_err(|e| anyhow!("{e}")))
        .collect()
}

/// `<dir>/<table>.<ext>`, e.g. `gold_prices.csv`.
fn output_path(dir: &Path, market: Market, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", market.table(), format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    fn minutes(from: i64, to: i64, close: f64) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2025, 1, 2, 6, 0, 0).unwrap();
        (from..to)
            .map(|i| {
                Bar::new(start + TimeDelta::minutes(i), close, close + 1.0, close - 1.0, close)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_append_merges_with_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), Market::Gold, OutputFormat::Csv);
        write_path(minutes(0, 10, 2650.0).bars(), &path, OutputFormat::Csv).unwrap();

        let mut existing = load_existing(dir.path(), Market::all(), OutputFormat::Csv)
            .await
            .unwrap();
        assert_eq!(existing.len(), 1);
        let previous = existing.remove(&Market::Gold).unwrap();
        assert_eq!(previous.len(), 10);

        // Refetched minutes 5..15 overlap the stored 5..10.
        let (total, added) =
            save_merged(previous, minutes(5, 15, 2660.0), &path, OutputFormat::Csv).unwrap();
        assert_eq!((total, added), (15, 5));

        let reloaded = load_csv(&path).await.unwrap();
        assert_eq!(reloaded.len(), 15);
        assert!((reloaded.bars()[4].close - 2650.0).abs() < 1e-9);
        assert!((reloaded.bars()[5].close - 2660.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_markets() {
        assert_eq!(parse_markets(&[]).unwrap(), Market::all().to_vec());
        assert_eq!(
            parse_markets(&["gold".to_string(), "oil".to_string()]).unwrap(),
            vec![Market::Gold, Market::Oil]
        );
        assert!(parse_markets(&["silver".to_string()]).is_err());
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("data"), Market::Gold, OutputFormat::Csv),
            PathBuf::from("data/gold_prices.csv")
        );
    }
}
