//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v`, `-vv` and `-vvv` select
/// info, debug and trace, with warnings shown by default and only errors
/// in quiet mode.
pub(crate) fn init(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
