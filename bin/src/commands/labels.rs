//! Labels command implementation.

use anyhow::{Context, Result};
use labelbar_lib::prelude::*;
use std::path::{Path, PathBuf};

use super::load_bars;
use crate::display::{Format, print_label_report, spinner};

/// Compute the label columns for an input file and write the labelled copy.
pub(crate) async fn labels(
    input: &Path,
    output: Option<PathBuf>,
    format: Format,
    range: Option<DateRange>,
    config: LabelConfig,
    quiet: bool,
) -> Result<()> {
    let engine = LabelEngine::new(config).context("Invalid label settings")?;
    let format = OutputFormat::from(format);
    let series = load_bars(input, range).await?;

    let progress = spinner(quiet, format!("Labelling {} bars", series.len()));
    let labels = engine.compute(&series);
    progress.finish_and_clear();

    let output = output.unwrap_or_else(|| labeled_path(input, format));
    write_path(&labels.labeled_bars(series.bars()), &output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_label_report(&labels.report());
    if !quiet {
        println!("\nSaved: {}", output.display());
    }
    Ok(())
}
