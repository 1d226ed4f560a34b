//! Display utilities and output formatting for the labelbar CLI.

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use labelbar_lib::prelude::*;
use labelbar_lib::{LabelReport, TargetStats};
use std::time::Duration;

/// Output file format.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Parquet => Self::Parquet,
        }
    }
}

/// Creates a spinner, hidden in quiet mode.
pub(crate) fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn percent(rate: Option<f64>) -> String {
    rate.map_or_else(|| "n/a".to_string(), |r| format!("{:.2}%", r * 100.0))
}

fn stats_row(name: &str, stats: &TargetStats) {
    let s = &stats.summary;
    println!(
        "{:<10} {:>10} {:>9} {:>9} {:>9} {:>10.2}",
        name,
        s.count,
        percent(Some(s.fraction_up)),
        percent(Some(s.fraction_down)),
        percent(Some(s.fraction_flat)),
        stats.average_run_length,
    );
}

/// Prints label distributions and run lengths as a table.
pub(crate) fn print_label_report(report: &LabelReport) {
    println!(
        "{:<10} {:>10} {:>9} {:>9} {:>9} {:>10}",
        "TARGET", "COUNT", "UP", "DOWN", "FLAT", "AVG RUN"
    );
    println!("{}", "-".repeat(62));
    stats_row("touch", &report.touch);
    stats_row("trend", &report.trend);
    stats_row("regime", &report.regime);
}

/// Prints the pattern scan results.
pub(crate) fn print_pattern_report(report: &PatternReport, config: &PatternConfig) {
    let name = if config.require_prior_up {
        "Up -> Up -> Down"
    } else {
        "Up -> Down"
    };
    println!("=== RESULTS ===");
    println!("Patterns found ({name}): {}", report.pattern_count);
    println!(
        "Success rate after pattern (+{}): {}",
        config.delta_price,
        percent(report.pattern_success_rate)
    );
    println!("General success rate (all intervals): {}", percent(report.general_success_rate));
    println!("Total intervals: {}", report.total_intervals);
    println!("Pattern frequency: {}", percent(report.pattern_frequency));
}
