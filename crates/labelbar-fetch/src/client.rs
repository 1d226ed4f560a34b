//! Authenticated HTTP client for the IG API.

use labelbar_types::{Bar, ConfigError, Market};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::url::{session_url, snapshot_url};
use crate::{FetchWindow, IgCredentials, parse_snapshot};

// Header names are lowercase; HTTP matches them case-insensitively.
const API_KEY: &str = "x-ig-api-key";
const CST: &str = "cst";
const SECURITY_TOKEN: &str = "x-security-token";

/// Configuration for the IG client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum markets fetched at once.
    pub concurrency: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            concurrency: 3,
            timeout: Duration::from_secs(60),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            user_agent: format!("labelbar/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while talking to the IG API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Login was rejected.
    #[error("Authentication failed: {status} - {body}")]
    Authentication {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Login succeeded but a session header was missing or unusable.
    #[error("Session header {0} missing from login response")]
    MissingToken(&'static str),

    /// A credential cannot be sent as an HTTP header.
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// Server returned an error status.
    #[error("Server error: {status} - {body}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The response body was not a snapshot.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credentials or settings are missing.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Serialize)]
struct Login<'a> {
    identifier: &'a str,
    password: &'a str,
}

/// HTTP client holding an authenticated IG session.
///
/// Every request carries the API key together with the `CST` and
/// `X-SECURITY-TOKEN` headers returned at login.
#[derive(Debug, Clone)]
pub struct IgClient {
    client: Client,
    config: ClientConfig,
    base_url: String,
}

fn header(name: &'static str, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|_| FetchError::InvalidHeader(name))
}

impl IgClient {
    /// Logs in and returns a client bound to the new session.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Authentication`] if the login is rejected and
    /// [`FetchError::MissingToken`] if a session header is absent.
    pub async fn connect(
        credentials: &IgCredentials,
        config: ClientConfig,
    ) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json; charset=UTF-8"));
        headers.insert("version", HeaderValue::from_static("2"));
        headers.insert(API_KEY, header(API_KEY, &credentials.api_key)?);

        let login_client = Self::build(&config, headers.clone())?;
        let response = login_client
            .post(session_url(&credentials.base_url))
            .json(&Login {
                identifier: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Authentication {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        for name in [CST, SECURITY_TOKEN] {
            let token = response
                .headers()
                .get(name)
                .cloned()
                .ok_or(FetchError::MissingToken(name))?;
            headers.insert(name, token);
        }
        tracing::info!(user = %credentials.username, "authenticated with IG");

        Ok(Self {
            client: Self::build(&config, headers)?,
            config,
            base_url: credentials.base_url.clone(),
        })
    }

    fn build(config: &ClientConfig, headers: HeaderMap) -> Result<Client, FetchError> {
        Ok(Client::builder()
            .default_headers(headers)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?)
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads the one-minute bars of `market` inside `window`.
    ///
    /// Data points with a missing field are skipped and logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries or the
    /// response is not a snapshot.
    pub async fn fetch_bars(
        &self,
        market: Market,
        window: FetchWindow,
    ) -> Result<Vec<Bar>, FetchError> {
        let url = snapshot_url(&self.base_url, market.epic(), window.start, window.end);
        tracing::debug!(%market, %url, "requesting chart snapshot");

        let response = self.send_with_retry(|| self.client.get(&url)).await?;
        let body = response.bytes().await?;
        let snapshot = parse_snapshot(&body)?;

        if snapshot.skipped > 0 {
            tracing::warn!(%market, skipped = snapshot.skipped, "skipped incomplete data points");
        }
        tracing::info!(%market, bars = snapshot.bars.len(), "fetched bars");
        Ok(snapshot.bars)
    }

    /// Sends a request, retrying server errors, rate limiting and
    /// transport failures with exponential backoff.
    async fn send_with_retry<F>(&self, request: F) -> Result<Response, FetchError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempts = 0;

        loop {
            match request().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let retryable =
                        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
                    if retryable && attempts < self.config.max_retries {
                        attempts += 1;
                        let delay = self.calculate_backoff_delay(attempts);
                        tracing::warn!(%status, attempts, ?delay, "retrying request");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(FetchError::ServerError {
                        status: status.as_u16(),
                        body: response.text().await.unwrap_or_default(),
                    });
                }
                Err(e) if is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    tracing::warn!(error = %e, attempts, ?delay, "retrying request");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        backoff_delay(&self.config, attempt)
    }
}

/// `base_delay * 2^attempt`, capped at `max_delay`, with a deterministic
/// ±25% jitter and a 100ms floor.
fn backoff_delay(config: &ClientConfig, attempt: u32) -> Duration {
    let exp_delay = config.base_delay_ms.saturating_mul(1u64 << attempt.min(10));
    let capped_delay = exp_delay.min(config.max_delay_ms);

    let jitter_range = capped_delay / 4;
    let jitter = if jitter_range > 0 {
        let offset = (u64::from(attempt) * 17) % (jitter_range * 2);
        offset as i64 - jitter_range as i64
    } else {
        0
    };

    let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
    Duration::from_millis(final_delay)
}

fn is_retryable_error(error: &reqwest::Error) -> bool {
    if error.is_builder() {
        return false;
    }
    error.is_timeout() || error.is_connect() || error.is_request()
}
