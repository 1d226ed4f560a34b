//! labelbar CLI - forward labels and pattern statistics for minute bars.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod display;
mod logging;

use config::{LabelOverrides, PatternOverrides};
use display::Format;

#[derive(Parser)]
#[command(name = "labelbar")]
#[command(about = "Forward labels and pattern statistics for minute bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML file with [labels] and [patterns] settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the markets that can be fetched
    Markets,

    /// Download one-minute bars from IG
    Fetch {
        /// Markets to fetch (oil, aud, gold). Defaults to all.
        markets: Vec<String>,

        /// Output directory. Files named <table>.<format>
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Merge into existing files, re-fetching from 5 days before their last bar
        #[arg(long)]
        append: bool,
    },

    /// Compute first-touch, trend and regime labels
    Labels {
        /// Input CSV of one-minute bars
        input: PathBuf,

        /// Output file path. Defaults to <input stem>_with_targets.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// First session date to keep (YYYY-MM-DD, from 06:00 UTC)
        #[arg(short, long)]
        start: Option<String>,

        /// Last session date to keep (YYYY-MM-DD, up to 06:00 UTC)
        #[arg(short, long)]
        end: Option<String>,

        #[command(flatten)]
        overrides: LabelOverrides,
    },

    /// Resample one-minute bars to a coarser interval
    Resample {
        /// Input CSV of one-minute bars
        input: PathBuf,

        /// Target interval (e.g. 15m, 1h, 4h, 1d)
        #[arg(short, long, default_value = "15m")]
        interval: String,

        /// Output file path. Defaults to <input stem>_<interval>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Keep buckets that are missing some source bars
        #[arg(long)]
        allow_partial: bool,
    },

    /// Scan resampled bars for the pull-back pattern
    Patterns {
        /// Input CSV of one-minute bars
        input: PathBuf,

        /// Interval the pattern is evaluated on
        #[arg(short, long, default_value = "15m")]
        interval: String,

        /// Write the per-bar pattern columns to this file
        #[arg(long)]
        rows: Option<PathBuf>,

        /// Keep buckets that are missing some source bars
        #[arg(long)]
        allow_partial: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: PatternOverrides,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = config::load(cli.config.as_deref())?;

    match command {
        Commands::Markets => commands::markets::list_markets(),
        Commands::Fetch {
            markets,
            output_dir,
            format,
            append,
        } => commands::fetch::fetch(&markets, &output_dir, format, append, cli.quiet).await,
        Commands::Labels {
            input,
            output,
            format,
            start,
            end,
            overrides,
        } => {
            let range = config::date_range(start.as_deref(), end.as_deref())?;
            let labels = overrides.apply(config.labels);
            commands::labels::labels(&input, output, format, range, labels, cli.quiet).await
        }
        Commands::Resample {
            input,
            interval,
            output,
            format,
            allow_partial,
        } => {
            commands::resample::resample(&input, &interval, output, format, allow_partial).await
        }
        Commands::Patterns {
            input,
            interval,
            rows,
            allow_partial,
            json,
            overrides,
        } => {
            let patterns = overrides.apply(config.patterns);
            commands::patterns::patterns(
                &input,
                &interval,
                rows.as_deref(),
                allow_partial,
                json,
                patterns,
            )
            .await
        }
    }
}
