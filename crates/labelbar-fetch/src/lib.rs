//! IG REST ingestion for labelbar.
//!
//! This crate downloads one-minute bars from the IG dealing API:
//!
//! - [`IgCredentials`] - API key and login read from `.env` / the environment
//! - [`IgClient`] - Authenticated HTTP client with retries and backoff
//! - [`url::snapshot_url`] - Chart snapshot URL construction
//! - [`parse_snapshot`] - Snapshot JSON to [`Bar`](labelbar_types::Bar)s
//! - [`IgSource`] - A market as a [`BarSource`](labelbar_types::BarSource)
//! - [`fetch_markets`] - Concurrent download of several markets

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/labelbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod credentials;
mod parse;
mod source;
pub mod url;
mod window;

#[cfg(test)]
mod test_server;

pub use client::{ClientConfig, FetchError, IgClient};
pub use credentials::{DEFAULT_BASE_URL, IgCredentials};
pub use parse::{Snapshot, parse_snapshot};
pub use source::{IgSource, fetch_markets};
pub use window::{FetchWindow, LOOKBACK_DAYS};
