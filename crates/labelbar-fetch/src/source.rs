//! Markets as bar sources.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use labelbar_types::{BarSource, LabelbarError, Market, PriceSeries};
use std::sync::Arc;

use crate::{FetchError, FetchWindow, IgClient};

/// One IG market behind the [`BarSource`] seam.
///
/// Each load requests the window following `last_known` (see
/// [`FetchWindow::since`]) up to the current time.
#[derive(Debug, Clone)]
pub struct IgSource {
    client: Arc<IgClient>,
    market: Market,
    last_known: Option<DateTime<Utc>>,
}

impl IgSource {
    /// Creates a source for `market` with no known history.
    #[must_use]
    pub const fn new(client: Arc<IgClient>, market: Market) -> Self {
        Self {
            client,
            market,
            last_known: None,
        }
    }

    /// Sets the timestamp of the newest bar already stored.
    #[must_use]
    pub const fn with_last_known(mut self, last_known: Option<DateTime<Utc>>) -> Self {
        self.last_known = last_known;
        self
    }

    /// Returns the market.
    #[must_use]
    pub const fn market(&self) -> Market {
        self.market
    }

    /// Downloads the window following the last known bar.
    ///
    /// An empty window or market yields an empty series.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries.
    pub async fn fetch(&self) -> Result<PriceSeries, FetchError> {
        let window = FetchWindow::since(self.last_known, Utc::now());
        let bars = self.client.fetch_bars(self.market, window).await?;
        Ok(PriceSeries::from_unsorted(bars))
    }
}

#[async_trait]
impl BarSource for IgSource {
    async fn load(&self) -> labelbar_types::Result<PriceSeries> {
        let series = self
            .fetch()
            .await
            .map_err(|e| LabelbarError::Source(e.to_string()))?;
        if series.is_empty() {
            return Err(LabelbarError::NoData {
                source_name: self.describe(),
            });
        }
        Ok(series)
    }

    fn describe(&self) -> String {
        format!("IG {} ({})", self.market, self.market.epic())
    }
}

/// Fetches several markets concurrently, at most
/// [`ClientConfig::concurrency`](crate::ClientConfig::concurrency) at a time.
///
/// `last_known` gives the newest stored bar per market. Results come back
/// in completion order.
pub async fn fetch_markets<F>(
    client: &Arc<IgClient>,
    markets: &[Market],
    last_known: F,
) -> Vec<(Market, Result<PriceSeries, FetchError>)>
where
    F: Fn(Market) -> Option<DateTime<Utc>>,
{
    let concurrency = client.config().concurrency.max(1);

    stream::iter(markets.iter().copied())
        .map(|market| {
            let source =
                IgSource::new(Arc::clone(client), market).with_last_known(last_known(market));
            async move { (market, source.fetch().await) }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await
}
