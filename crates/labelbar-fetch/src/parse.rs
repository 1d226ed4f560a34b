//! Chart snapshot decoding.

use chrono::DateTime;
use labelbar_types::{Bar, Quote};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotResponse {
    #[serde(default)]
    intervals_data_points: Vec<IntervalPoints>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntervalPoints {
    #[serde(default)]
    data_points: Vec<DataPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataPoint {
    timestamp: Option<i64>,
    open_price: Option<SidePrice>,
    high_price: Option<SidePrice>,
    low_price: Option<SidePrice>,
    close_price: Option<SidePrice>,
    last_traded_volume: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct SidePrice {
    ask: Option<f64>,
    bid: Option<f64>,
}

impl DataPoint {
    fn into_bar(self) -> Option<Bar> {
        let timestamp = DateTime::from_timestamp_millis(self.timestamp?)?;
        let [open, high, low, close] = [
            self.open_price?,
            self.high_price?,
            self.low_price?,
            self.close_price?,
        ];
        let ask = Quote::new(open.ask?, high.ask?, low.ask?, close.ask?);
        let bid = Quote::new(open.bid?, high.bid?, low.bid?, close.bid?);
        Some(Bar::from_sides(timestamp, ask, bid, Some(self.last_traded_volume?)))
    }
}

/// Bars decoded from one snapshot response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Decoded bars in response order.
    pub bars: Vec<Bar>,
    /// Data points dropped for a missing timestamp, price side or volume.
    pub skipped: usize,
}

/// Decodes a chart snapshot response body.
///
/// Each data point becomes a [`Bar`] whose OHLC is the ask/bid mid price.
/// Points lacking any field are counted in [`Snapshot::skipped`] rather
/// than failing the whole response.
///
/// # Errors
///
/// Returns an error if the body is not a JSON snapshot object.
pub fn parse_snapshot(body: &[u8]) -> Result<Snapshot, serde_json::Error> {
    let response: SnapshotResponse = serde_json::from_slice(body)?;

    let mut snapshot = Snapshot::default();
    for point in response
        .intervals_data_points
        .into_iter()
        .flat_map(|interval| interval.data_points)
    {
        match point.into_bar() {
            Some(bar) => snapshot.bars.push(bar),
            None => snapshot.skipped += 1,
        }
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "intervalsDataPoints": [
            {"dataPoints": [
                {
                    "timestamp": 1735800000000,
                    "openPrice": {"bid": 2649.0, "ask": 2650.0},
                    "closePrice": {"bid": 2650.0, "ask": 2651.0},
                    "highPrice": {"bid": 2651.0, "ask": 2652.0},
                    "lowPrice": {"bid": 2648.0, "ask": 2649.0},
                    "lastTradedVolume": 12
                },
                {
                    "timestamp": 1735800060000,
                    "openPrice": {"bid": null, "ask": 2650.0},
                    "closePrice": {"bid": 2650.0, "ask": 2651.0},
                    "highPrice": {"bid": 2651.0, "ask": 2652.0},
                    "lowPrice": {"bid": 2648.0, "ask": 2649.0},
                    "lastTradedVolume": 3
                }
            ]},
            {"dataPoints": [
                {
                    "timestamp": 1735800120000,
                    "openPrice": {"bid": 2650.0, "ask": 2651.0},
                    "closePrice": {"bid": 2651.0, "ask": 2652.0},
                    "highPrice": {"bid": 2652.0, "ask": 2653.0},
                    "lowPrice": {"bid": 2649.0, "ask": 2650.0}
                }
            ]},
            {"dataPoints": []}
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(BODY.as_bytes()).unwrap();
        assert_eq!(snapshot.bars.len(), 1);
        assert_eq!(snapshot.skipped, 2);

        let bar = snapshot.bars[0];
        assert_eq!(bar.timestamp_millis(), 1_735_800_000_000);
        assert!((bar.open - 2649.5).abs() < 1e-9);
        assert!((bar.high - 2651.5).abs() < 1e-9);
        assert!((bar.low - 2648.5).abs() < 1e-9);
        assert!((bar.close - 2650.5).abs() < 1e-9);
        assert_eq!(bar.ask.unwrap().open, 2650.0);
        assert_eq!(bar.bid.unwrap().close, 2650.0);
        assert_eq!(bar.volume, Some(12.0));
    }

    #[test]
    fn test_empty_response() {
        let snapshot = parse_snapshot(b"{}").unwrap();
        assert!(snapshot.bars.is_empty());
        assert_eq!(snapshot.skipped, 0);
    }

    #[test]
    fn test_invalid_body() {
        assert!(parse_snapshot(b"<html>").is_err());
    }
}
